use crate::models::StatKind;
use crate::svg::LabelVisibility;
use serde::Serialize;
use std::sync::Mutex;

pub const NO_DATA_MESSAGE: &str = "No data found! Try again a bit later.";
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub loader_visible: bool,
    pub content_visible: bool,
    pub content_class: Option<String>,
    pub notices: Vec<String>,
}

#[derive(Debug)]
pub struct PageStatus {
    inner: Mutex<PageSnapshot>,
}

impl Default for PageStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl PageStatus {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PageSnapshot {
                loader_visible: true,
                content_visible: false,
                content_class: None,
                notices: Vec::new(),
            }),
        }
    }

    pub fn report_no_data(&self) {
        self.update(|page| {
            page.loader_visible = false;
            page.notices.push(NO_DATA_MESSAGE.to_string());
        });
    }

    pub fn show_content(&self) {
        self.update(|page| {
            page.loader_visible = false;
            page.content_visible = true;
            page.content_class = Some("animate".to_string());
        });
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn update(&self, apply: impl FnOnce(&mut PageSnapshot)) {
        let mut page = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut page);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTile {
    pub kind: StatKind,
    pub color: &'static str,
    pub value: String,
}

pub fn scaffold_tiles(goal_amount: u32) -> Vec<StatTile> {
    StatKind::ALL
        .iter()
        .map(|&kind| StatTile {
            kind,
            color: kind.color_key(),
            value: match kind {
                StatKind::Goal => goal_amount.to_string(),
                _ => PLACEHOLDER.to_string(),
            },
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PaintResponse {
    pub page: PageSnapshot,
    pub tiles: Vec<StatTile>,
    pub stats_svg: String,
    pub exercises_svg: String,
    pub commits_html: String,
    pub labels: LabelVisibility,
}

impl PaintResponse {
    pub fn degraded(page: PageSnapshot) -> Self {
        Self {
            page,
            tiles: Vec::new(),
            stats_svg: String::new(),
            exercises_svg: String::new(),
            commits_html: String::new(),
            labels: LabelVisibility::new(0),
        }
    }
}
