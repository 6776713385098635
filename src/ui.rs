use crate::colors::ColorSetting;
use crate::models::{CachedDashboard, Commit};
use crate::page::{scaffold_tiles, PageSnapshot, PaintResponse, StatTile, NO_DATA_MESSAGE};
use crate::stats::{format_amount, stat_slices};
use crate::svg::{
    draw_exercises_chart, draw_stats_bar, escape, markup, LabelVisibility, CHART_PADDING,
    EXERCISES_CHART_HEIGHT, EXERCISES_CHART_WIDTH, STATS_BAR_WIDTH,
};

pub fn render_scaffold(goal_amount: u32, colors: &[ColorSetting]) -> String {
    INDEX_HTML
        .replace("{{COLOR_VARS}}", &render_color_vars(colors))
        .replace("{{SLIDERS}}", &render_sliders(colors))
        .replace("{{TILES}}", &render_tiles(&scaffold_tiles(goal_amount)))
        .replace("{{STATS_VIEWBOX}}", &format!("0 0 {STATS_BAR_WIDTH} 40"))
        .replace(
            "{{CHART_VIEWBOX}}",
            &format!(
                "0 -{CHART_PADDING} {EXERCISES_CHART_WIDTH} {}",
                EXERCISES_CHART_HEIGHT + CHART_PADDING * 2.0
            ),
        )
        .replace("{{NO_DATA}}", NO_DATA_MESSAGE)
}

fn render_color_vars(colors: &[ColorSetting]) -> String {
    colors
        .iter()
        .map(|color| format!("      --{}: {};\n", color.key.as_str(), escape(&color.css)))
        .collect()
}

fn render_sliders(colors: &[ColorSetting]) -> String {
    colors
        .iter()
        .map(|color| {
            let key = color.key.as_str();
            format!(
                "      <label class=\"slider {key}\">{key}\n        <input type=\"range\" id=\"range-{key}\" data-color=\"{key}\" min=\"0\" max=\"360\" step=\"1\" value=\"{}\" />\n      </label>\n",
                color.hue
            )
        })
        .collect()
}

fn render_tiles(tiles: &[StatTile]) -> String {
    tiles
        .iter()
        .map(|tile| {
            let kind = tile.kind.as_str();
            format!(
                "      <div id=\"{kind}\" class=\"stat {}\">\n        <div class=\"data\">{}</div>\n        <div class=\"label\">{kind}</div>\n      </div>\n",
                tile.color,
                escape(&tile.value)
            )
        })
        .collect()
}

pub fn render_commits(commits: &[Commit]) -> String {
    commits
        .iter()
        .map(|commit| {
            format!(
                "<div class=\"commit\"><div class=\"author\">{}</div><div class=\"message\">{}</div><div class=\"date\">{}</div></div>",
                escape(&commit.author),
                escape(&commit.message),
                escape(&commit.date)
            )
        })
        .collect()
}

pub fn paint(dashboard: &CachedDashboard, goal_amount: u32, page: PageSnapshot) -> PaintResponse {
    let slices = stat_slices(dashboard.done_amount, dashboard.review_amount, goal_amount);
    let tiles = slices
        .iter()
        .map(|slice| StatTile {
            kind: slice.kind,
            color: slice.kind.color_key(),
            value: format_amount(slice.amount),
        })
        .collect();

    let labels = LabelVisibility::new(dashboard.exercises_per_date.len());

    PaintResponse {
        page,
        tiles,
        stats_svg: markup(&draw_stats_bar(&slices, STATS_BAR_WIDTH)),
        exercises_svg: markup(&draw_exercises_chart(
            &dashboard.exercises_per_date,
            EXERCISES_CHART_WIDTH,
            &labels,
        )),
        commits_html: render_commits(&dashboard.commits),
        labels,
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Exercise Dashboard</title>
  <style>
    :root {
{{COLOR_VARS}}      --grey: hsl(0, 0%, 60%);
      --dark_grey: hsl(0, 0%, 35%);
      --bg: hsl(220, 15%, 10%);
      --card: hsl(220, 15%, 14%);
      --ink: hsl(0, 0%, 92%);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    #loader-container {
      display: grid;
      place-items: center;
      min-height: 60vh;
    }

    .loader {
      width: 48px;
      height: 48px;
      border-radius: 50%;
      border: 4px solid var(--dark_grey);
      border-top-color: var(--green);
      animation: spin 900ms linear infinite;
    }

    #content {
      display: none;
      width: min(960px, 100%);
      margin: 0 auto;
    }

    #content.animate {
      animation: rise 600ms ease;
    }

    #datas {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 16px;
    }

    .stat {
      background: var(--card);
      border-radius: 14px;
      padding: 16px;
      text-align: center;
    }

    .stat .data {
      font-size: 2rem;
      font-weight: 600;
    }

    .stat .label {
      text-transform: uppercase;
      letter-spacing: 0.12em;
      font-size: 0.8rem;
    }

    .stat.green { color: var(--green); }
    .stat.grey { color: var(--grey); }
    .stat.red { color: var(--red); }
    .stat.dark_grey { color: var(--dark_grey); }

    #graph, #exercises_graph {
      width: 100%;
      display: block;
    }

    #exercises_graph circle {
      cursor: pointer;
    }

    #commit_list {
      max-height: 360px;
      overflow-y: auto;
      display: grid;
      gap: 8px;
    }

    .commit {
      display: grid;
      grid-template-columns: 140px 1fr 60px;
      gap: 12px;
      background: var(--card);
      border-radius: 10px;
      padding: 10px 14px;
    }

    .commit .author { color: var(--green); }
    .commit .date { color: var(--grey); text-align: right; }

    .settings {
      display: flex;
      gap: 24px;
      margin-top: 24px;
    }

    .notice {
      text-align: center;
      margin-top: 24px;
    }

    @keyframes spin {
      to {
        transform: rotate(360deg);
      }
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }
  </style>
</head>
<body>
  <div id="loader-container"><div class="loader"></div></div>

  <main id="content">
    <section id="datas">
{{TILES}}    </section>

    <section id="exercises_stats">
      <svg id="graph" viewBox="{{STATS_VIEWBOX}}" role="img" aria-label="Exercise shares"></svg>
    </section>

    <section>
      <svg id="exercises_graph" viewBox="{{CHART_VIEWBOX}}" role="img" aria-label="Exercises per date"></svg>
    </section>

    <section id="commit_list"></section>

    <section class="settings">
{{SLIDERS}}    </section>
  </main>

  <script>
    const root = document.documentElement;
    const loader = document.getElementById('loader-container');
    const content = document.getElementById('content');
    const hsl = (hue) => `hsl(${hue}, 100%, 65%)`;

    document.querySelectorAll('input[data-color]').forEach((input) => {
      const key = input.dataset.color;
      input.addEventListener('input', () => {
        root.style.setProperty(`--${key}`, hsl(input.value));
      });
      input.addEventListener('change', () => {
        fetch('/api/colors', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ key, hue: Number(input.value) })
        });
      });
    });

    const applyPage = (page) => {
      loader.style.display = page.loader_visible ? '' : 'none';
      content.style.display = page.content_visible ? 'block' : 'none';
      if (page.content_class) {
        content.className = page.content_class;
      }
      page.notices.forEach((text) => {
        const notice = document.createElement('div');
        notice.className = 'notice';
        notice.textContent = text;
        document.body.append(notice);
      });
    };

    let labels = { pinned: [], visible: {} };

    const renderValueLabels = () => {
      Object.entries(labels.visible).forEach(([index, shown]) => {
        const label = document.getElementById(`data-text-value-${index}`);
        if (label) {
          label.style.opacity = shown ? 1 : 0;
        }
      });
    };

    const setHovered = (index, shown) => {
      if (labels.pinned.includes(index)) {
        return;
      }
      labels.visible[index] = shown;
      renderValueLabels();
    };

    const wireValueLabels = () => {
      document.querySelectorAll('#exercises_graph circle').forEach((circle) => {
        const index = Number(circle.id.replace('data-point-', ''));
        circle.addEventListener('mouseenter', () => setHovered(index, true));
        circle.addEventListener('mouseleave', () => setHovered(index, false));
      });
    };

    const paint = async () => {
      const res = await fetch('/api/paint');
      if (!res.ok) {
        applyPage({ loader_visible: false, content_visible: false, notices: ['{{NO_DATA}}'] });
        return;
      }
      const data = await res.json();
      applyPage(data.page);
      data.tiles.forEach((tile) => {
        document.querySelector(`#${tile.kind} .data`).textContent = tile.value;
      });
      document.getElementById('graph').innerHTML = data.stats_svg;
      document.getElementById('exercises_graph').innerHTML = data.exercises_svg;
      document.getElementById('commit_list').innerHTML = data.commits_html;
      labels = data.labels;
      renderValueLabels();
      wireValueLabels();
    };

    paint();
  </script>
</body>
</html>
"#;
