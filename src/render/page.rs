//! HTML documents: the live viewer shell and the static snapshot
//!
//! The viewer is a thin client. It forwards pointer and control events to
//! `POST /api/event` and swaps in whatever surfaces come back; all drawing
//! happens server side.

use std::fmt::Write;

use super::{DetailPanel, Scene};
use crate::format::escape;
use crate::view::TfCounts;

pub const LOAD_FAILED: &str =
    "Failed to load data. Make sure the tfbs-explorer server is running.";

const STYLE: &str = r#"
:root { --bg: #0f1320; --panel: #171c2c; --border: rgba(255,255,255,.08); --text: #e8ebf5; --dim: rgba(255,255,255,.65); }
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--text); font: 14px/1.45 -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; }
header { display: flex; align-items: center; gap: 1rem; padding: 14px 20px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 17px; margin: 0; font-weight: 700; }
header .controls { margin-left: auto; display: flex; align-items: center; gap: .75rem; }
select, button { background: var(--panel); color: var(--text); border: 1px solid var(--border); border-radius: 8px; padding: 5px 10px; font: inherit; }
button { cursor: pointer; }
main { display: grid; grid-template-columns: 1fr 300px; grid-template-rows: 62vh 36vh; gap: 12px; padding: 12px; }
.panel { background: var(--panel); border: 1px solid var(--border); border-radius: 14px; padding: 12px; overflow: hidden; }
#heatmap { grid-column: 1; grid-row: 1; }
#bars { grid-column: 1; grid-row: 2; }
#side { grid-column: 2; grid-row: 1 / span 2; display: flex; flex-direction: column; gap: 12px; }
#status { color: var(--dim); font-size: 12px; min-height: 1.4em; }
#detailsText { font-size: 13px; }
.axis text { fill: rgba(255,255,255,.75); }
.axis path, .axis line { stroke: rgba(255,255,255,.25); }
.cell { cursor: pointer; transition: stroke .1s; }
.cell:hover { stroke: rgba(255,255,255,.6); }
.tooltip { position: absolute; pointer-events: none; background: rgba(10,12,20,.92); border: 1px solid var(--border); border-radius: 8px; padding: 8px 10px; font-size: 12px; opacity: 0; }
.notes { color: var(--dim); font-size: 12px; }
"#;

const SCRIPT: &str = r#"
(function () {
  const $ = (id) => document.getElementById(id);
  const tooltip = document.createElement('div');
  tooltip.className = 'tooltip';
  document.body.appendChild(tooltip);

  let hovered = null;
  let pointer = { x: 0, y: 0 };
  // interactions wait for the first scene
  let loaded = false;

  function place() {
    tooltip.style.left = (pointer.x + 12) + 'px';
    tooltip.style.top = (pointer.y + 12) + 'px';
  }

  function apply(scene) {
    if (scene.legend !== undefined) $('legendSvg').innerHTML = scene.legend;
    if (scene.heatmap !== undefined) $('heatSvg').innerHTML = scene.heatmap;
    if (scene.bars !== undefined) $('barSvg').innerHTML = scene.bars;
    if (scene.detail !== undefined) {
      $('status').textContent = scene.detail.status;
      $('detailsText').innerHTML = scene.detail.html;
      $('miniSvg').innerHTML = scene.detail.mini_svg;
    }
    if (scene.tooltip !== undefined) {
      tooltip.innerHTML = scene.tooltip.html;
      tooltip.style.opacity = scene.tooltip.visible ? 1 : 0;
      place();
    }
  }

  function failed(err) {
    console.error(err);
    $('status').textContent = '__LOAD_FAILED__';
  }

  function send(msg) {
    return fetch('/api/event', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(msg)
    })
      .then((r) => r.json())
      .then((res) => {
        if (!res.ok) throw new Error(res.error);
        $('tfCount').value = String(res.data.tf_count);
        apply(res.data.scene);
        return res.data;
      });
  }

  function layout() {
    const heat = $('heatmap');
    const bars = $('bars');
    const mini = $('miniSvg');
    return {
      type: 'resize',
      heatmap: { width: heat.clientWidth - 24, height: heat.clientHeight - 64 },
      bars: { width: bars.clientWidth - 24, height: bars.clientHeight - 44 },
      mini: { width: mini.clientWidth || 260, height: mini.clientHeight || 150 }
    };
  }

  function cellOf(target) {
    const el = target.closest && target.closest('.cell');
    return el ? { tissue: el.dataset.tissue, tf: el.dataset.tf } : null;
  }

  $('heatSvg').addEventListener('mousemove', (ev) => {
    if (!loaded) return;
    pointer = { x: ev.pageX, y: ev.pageY };
    const cell = cellOf(ev.target);
    if (!cell) {
      if (hovered) {
        hovered = null;
        send({ type: 'leave' }).catch(failed);
      }
      return;
    }
    place();
    if (hovered && hovered.tissue === cell.tissue && hovered.tf === cell.tf) return;
    hovered = cell;
    send(Object.assign({ type: 'hover' }, cell)).catch(failed);
  });

  $('heatSvg').addEventListener('mouseleave', () => {
    if (!loaded || !hovered) return;
    hovered = null;
    send({ type: 'leave' }).catch(failed);
  });

  $('heatSvg').addEventListener('click', (ev) => {
    if (!loaded) return;
    const cell = cellOf(ev.target);
    if (cell) send(Object.assign({ type: 'click' }, cell)).catch(failed);
  });

  $('barSvg').addEventListener('mousemove', (ev) => {
    const tip = ev.target.getAttribute && ev.target.getAttribute('data-tip');
    pointer = { x: ev.pageX, y: ev.pageY };
    tooltip.innerHTML = tip || '';
    tooltip.style.opacity = tip ? 1 : 0;
    place();
  });
  $('barSvg').addEventListener('mouseleave', () => { tooltip.style.opacity = 0; });

  $('tfCount').addEventListener('change', (ev) => {
    if (!loaded) return;
    hovered = null;
    send({ type: 'set_tf_count', count: +ev.target.value }).catch(failed);
  });

  $('clearPin').addEventListener('click', () => {
    if (!loaded) return;
    send({ type: 'clear_pin' }).catch(failed);
  });

  let resizeTimer = null;
  window.addEventListener('resize', () => {
    if (!loaded) return;
    clearTimeout(resizeTimer);
    resizeTimer = setTimeout(() => send(layout()).catch(failed), 120);
  });

  fetch('/api/scene')
    .then((r) => r.json())
    .then((res) => {
      if (!res.ok) throw new Error(res.error);
      $('tfCount').value = String(res.data.tf_count);
      loaded = true;
      return send(layout());
    })
    .catch(failed);
})();
"#;

fn head(out: &mut String, title: &str) {
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{style}</style>
</head>
"#,
        title = escape(title),
        style = STYLE,
    );
}

fn tf_count_select(counts: &TfCounts, current: usize) -> String {
    let options: String = counts
        .values()
        .iter()
        .map(|n| {
            let selected = if *n == current { " selected" } else { "" };
            format!(r#"<option value="{n}"{selected}>Top {n}</option>"#)
        })
        .collect();
    format!(r#"<label>TFs <select id="tfCount">{options}</select></label>"#)
}

/// The interactive viewer served at `/`
pub fn viewer(title: &str, counts: &TfCounts, current: usize) -> String {
    let mut out = String::new();
    head(&mut out, title);
    let _ = write!(
        out,
        r#"<body>
<header>
<h1>{title}</h1>
<div id="legendSvg"></div>
<div class="controls">{select}<button id="clearPin" type="button">Clear pin</button></div>
</header>
<main>
<section class="panel" id="heatmap"><div id="heatSvg"></div></section>
<section class="panel" id="bars"><div id="barSvg"></div></section>
<aside id="side">
<section class="panel">
<div id="status">Loading…</div>
<div id="detailsText">No selection yet.</div>
</section>
<section class="panel"><div id="miniSvg" style="width:260px;height:150px"></div></section>
</aside>
</main>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(title),
        select = tf_count_select(counts, current),
        script = SCRIPT.replace("__LOAD_FAILED__", LOAD_FAILED),
    );
    out
}

/// A self-contained document holding one rendered scene
pub fn snapshot(
    title: &str,
    scene: &Scene,
    notes: &[String],
    caption: &str,
    appendix: &str,
) -> String {
    let mut out = String::new();
    head(&mut out, title);

    let detail = scene.detail.clone().unwrap_or_else(|| DetailPanel {
        status: String::new(),
        html: String::new(),
        mini_svg: String::new(),
    });
    let notes: String = notes
        .iter()
        .map(|n| format!("<li>{}</li>", escape(n)))
        .collect();

    let _ = write!(
        out,
        r#"<body>
<header>
<h1>{title}</h1>
{legend}
<div class="controls notes">{caption}</div>
</header>
<main>
<section class="panel" id="heatmap">{heatmap}</section>
<section class="panel" id="bars">{bars}</section>
<aside id="side">
<section class="panel">
<div id="status">{status}</div>
<div id="detailsText">{details}</div>
</section>
<section class="panel">{mini}</section>
<section class="panel"><ul class="notes">{notes}</ul></section>
</aside>
</main>
{appendix}
</body>
</html>
"#,
        title = escape(title),
        legend = scene.legend.as_deref().unwrap_or_default(),
        caption = escape(caption),
        heatmap = scene.heatmap.as_deref().unwrap_or_default(),
        bars = scene.bars.as_deref().unwrap_or_default(),
        status = escape(&detail.status),
        details = detail.html,
        mini = detail.mini_svg,
        appendix = appendix,
    );
    out
}
