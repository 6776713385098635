use crate::models::{ExercisesPerDate, StatSlice};
use crate::stats::{percentage_label, percentages, total_amount};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

pub const STATS_BAR_WIDTH: f64 = 600.0;
pub const EXERCISES_CHART_WIDTH: f64 = 900.0;
pub const EXERCISES_CHART_HEIGHT: f64 = 400.0;
pub const CHART_PADDING: f64 = 30.0;
pub const Y_DOMAIN_MAX: f64 = 110.0;

const BAR_Y: f64 = 30.0;
const BAR_LABEL_Y: f64 = 10.0;
const LINK_OFFSET: f64 = 5.0;
const VALUE_LABEL_RISE: f64 = 50.0;
const POINT_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    name: &'static str,
    attrs: Vec<(String, String)>,
    text: Option<String>,
}

impl SvgElement {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            text: None,
        }
    }

    pub fn attr(mut self, key: &str, value: impl Display) -> Self {
        self.attrs.push((to_dash_case(key), value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_markup(&self) -> String {
        let mut out = format!("<{}", self.name);
        for (key, value) in &self.attrs {
            out.push_str(&format!(" {key}=\"{}\"", escape(value)));
        }
        match &self.text {
            Some(text) => out.push_str(&format!(">{}</{}>", escape(text), self.name)),
            None => out.push_str(" />"),
        }
        out
    }
}

pub fn to_dash_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn markup(elements: &[SvgElement]) -> String {
    elements.iter().map(SvgElement::to_markup).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelVisibility {
    pinned: Vec<usize>,
    visible: BTreeMap<usize, bool>,
}

impl LabelVisibility {
    pub fn new(len: usize) -> Self {
        let pinned: Vec<usize> = match len {
            0 => Vec::new(),
            1 => vec![0],
            _ => vec![0, len - 1],
        };
        let visible = (0..len).map(|i| (i, pinned.contains(&i))).collect();
        Self { pinned, visible }
    }

    pub fn is_pinned(&self, index: usize) -> bool {
        self.pinned.contains(&index)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(&index).copied().unwrap_or(false)
    }
}

pub fn draw_stats_bar(slices: &[StatSlice], width: f64) -> Vec<SvgElement> {
    let total = total_amount(slices);
    let shares = percentages(slices);
    let scale = |amount: f64| if total == 0.0 { 0.0 } else { width * amount / total };

    let mut elements = Vec::with_capacity(slices.len() * 2);
    let mut preceding = 0.0;
    for (slice, share) in slices.iter().zip(shares) {
        let x1 = scale(preceding);
        let x2 = scale(slice.amount) + x1;
        let kind = slice.kind.as_str();
        let color = format!("var(--{})", slice.kind.color_key());

        elements.push(
            SvgElement::new("line")
                .attr("id", format!("line-exercises-{kind}"))
                .attr("x1", x1)
                .attr("x2", x2)
                .attr("y1", BAR_Y)
                .attr("y2", BAR_Y)
                .attr("stroke", &color)
                .attr("strokeWidth", 5),
        );
        elements.push(
            SvgElement::new("text")
                .attr("id", format!("percentage-exercises-{kind}"))
                .attr("x", x1)
                .attr("y", BAR_LABEL_Y)
                .attr("fill", &color)
                .attr("fontSize", "13px")
                .text(percentage_label(share)),
        );

        preceding += slice.amount;
    }
    elements
}

pub fn point_x(index: usize, count: usize, width: f64) -> f64 {
    if count <= 1 {
        return CHART_PADDING;
    }
    let inner = width - CHART_PADDING * 2.0;
    inner / (count - 1) as f64 * index as f64 + CHART_PADDING
}

pub fn point_y(exercises: u32) -> f64 {
    EXERCISES_CHART_HEIGHT - EXERCISES_CHART_HEIGHT / Y_DOMAIN_MAX * f64::from(exercises)
}

pub fn draw_exercises_chart(
    series: &[ExercisesPerDate],
    width: f64,
    labels: &LabelVisibility,
) -> Vec<SvgElement> {
    let mut elements = Vec::with_capacity(series.len() * 4);
    let mut prev: Option<(f64, f64)> = None;

    for (i, point) in series.iter().enumerate() {
        let x = point_x(i, series.len(), width);
        let y = point_y(point.exercises);

        elements.push(
            SvgElement::new("text")
                .attr("x", x)
                .attr("y", EXERCISES_CHART_HEIGHT)
                .attr("fill", "var(--grey)")
                .attr("fontSize", "13px")
                .attr("textAnchor", "middle")
                .text(point.date.clone()),
        );

        // The first point links to itself.
        let (x2, y2) = match prev {
            Some((prev_x, prev_y)) => (prev_x + LINK_OFFSET, prev_y),
            None => (x, y),
        };
        elements.push(
            SvgElement::new("line")
                .attr("x1", x)
                .attr("x2", x2)
                .attr("y1", y)
                .attr("y2", y2)
                .attr("stroke", "var(--green)")
                .attr("strokeWidth", 1),
        );

        let opacity = if labels.is_visible(i) { 1 } else { 0 };
        elements.push(
            SvgElement::new("text")
                .attr("id", format!("data-text-value-{i}"))
                .attr("x", x)
                .attr("y", y - VALUE_LABEL_RISE)
                .attr("fill", "var(--green)")
                .attr("fontSize", "50px")
                .attr("textAnchor", "middle")
                .attr("style", format!("opacity: {opacity}"))
                .text(point.exercises.to_string()),
        );

        elements.push(
            SvgElement::new("circle")
                .attr("id", format!("data-point-{i}"))
                .attr("cx", x)
                .attr("cy", y)
                .attr("fill", "var(--green)")
                .attr("r", POINT_RADIUS),
        );

        prev = Some((x, y));
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::stat_slices;

    fn series(points: &[(&str, u32)]) -> Vec<ExercisesPerDate> {
        points
            .iter()
            .map(|(date, exercises)| ExercisesPerDate {
                date: date.to_string(),
                exercises: *exercises,
            })
            .collect()
    }

    fn num(element: &SvgElement, key: &str) -> f64 {
        element.get(key).unwrap().parse().unwrap()
    }

    #[test]
    fn element_markup_is_dash_cased_and_escaped() {
        let el = SvgElement::new("text").attr("textAnchor", "middle").text("a<b & \"c\"");
        assert_eq!(
            el.to_markup(),
            "<text text-anchor=\"middle\">a&lt;b &amp; &quot;c&quot;</text>"
        );
        assert_eq!(SvgElement::new("circle").attr("r", 5).to_markup(), "<circle r=\"5\" />");
    }

    #[test]
    fn stats_bar_segments_are_cumulative() {
        let elements = draw_stats_bar(&stat_slices(40, 20.0, 90), 900.0);
        assert_eq!(elements.len(), 6);

        let lines: Vec<&SvgElement> = elements.iter().step_by(2).collect();
        assert_eq!(lines[0].get("id"), Some("line-exercises-done"));
        assert_eq!(num(lines[0], "x1"), 0.0);
        assert_eq!(num(lines[0], "x2"), 400.0);
        assert_eq!(num(lines[1], "x1"), 400.0);
        assert_eq!(num(lines[1], "x2"), 600.0);
        assert_eq!(num(lines[2], "x2"), 900.0);
        assert_eq!(lines[2].get("stroke"), Some("var(--red)"));
        assert_eq!(lines[0].get("stroke-width"), Some("5"));

        let labels: Vec<String> = elements
            .iter()
            .skip(1)
            .step_by(2)
            .map(|el| el.text.clone().unwrap())
            .collect();
        assert_eq!(labels, vec!["44%", "22%", "33%"]);
    }

    #[test]
    fn label_visibility_pins_ends() {
        let labels = LabelVisibility::new(4);
        assert!(labels.is_pinned(0));
        assert!(labels.is_pinned(3));
        assert!(!labels.is_pinned(1));
        assert!(labels.is_visible(0));
        assert!(!labels.is_visible(1));
        assert!(!labels.is_visible(2));
        assert!(labels.is_visible(3));

        assert!(LabelVisibility::new(1).is_visible(0));
        assert!(!LabelVisibility::new(0).is_visible(0));
    }

    #[test]
    fn label_visibility_serializes_for_the_page() {
        let json = serde_json::to_value(LabelVisibility::new(3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pinned": [0, 2],
                "visible": { "0": true, "1": false, "2": true }
            })
        );
    }

    #[test]
    fn chart_points_spread_and_invert() {
        let data = series(&[("03-01", 0), ("04-01", 55), ("05-01", 110)]);
        let labels = LabelVisibility::new(data.len());
        let elements = draw_exercises_chart(&data, 660.0, &labels);
        assert_eq!(elements.len(), 12);

        let circles: Vec<&SvgElement> = elements.iter().filter(|el| el.name == "circle").collect();
        let xs: Vec<f64> = circles.iter().map(|c| num(c, "cx")).collect();
        let ys: Vec<f64> = circles.iter().map(|c| num(c, "cy")).collect();
        assert_eq!(xs, vec![30.0, 330.0, 630.0]);
        for (y, expected) in ys.iter().zip([400.0, 200.0, 0.0]) {
            assert!((y - expected).abs() < 1e-9, "{y} != {expected}");
        }

        let values: Vec<Option<&str>> = elements
            .iter()
            .filter(|el| el.get("font-size") == Some("50px"))
            .map(|el| el.get("style"))
            .collect();
        assert_eq!(values, vec![Some("opacity: 1"), Some("opacity: 0"), Some("opacity: 1")]);
    }

    #[test]
    fn links_point_back_to_previous() {
        let data = series(&[("03-01", 11), ("04-01", 22)]);
        let elements = draw_exercises_chart(&data, 660.0, &LabelVisibility::new(2));
        let lines: Vec<&SvgElement> = elements.iter().filter(|el| el.name == "line").collect();

        assert_eq!(num(lines[0], "x1"), num(lines[0], "x2"));
        assert_eq!(num(lines[0], "y1"), num(lines[0], "y2"));

        assert_eq!(num(lines[1], "x2"), 35.0);
        assert_eq!(num(lines[1], "y2"), point_y(11));
    }

    #[test]
    fn single_point_sits_at_padding() {
        assert_eq!(point_x(0, 1, 900.0), CHART_PADDING);
        let data = series(&[("01-01", 5)]);
        let elements = draw_exercises_chart(&data, 900.0, &LabelVisibility::new(1));
        let value = elements.iter().find(|el| el.get("font-size") == Some("50px")).unwrap();
        assert_eq!(value.get("style"), Some("opacity: 1"));
    }
}
