use crate::models::{Consistency, StatsResponse, StreakStatus, TodayStatus, TrackerState};
use crate::tracker::{date_for_day, today_status, MAX_DAYS, PRESET_DAYS};
use chrono::NaiveDate;

pub fn render_index(state: &TrackerState, stats: &StatsResponse, today: NaiveDate) -> String {
    let content = if state.is_setup() {
        render_tracker(state, stats, today)
    } else {
        render_setup(today)
    };
    let reset = if state.is_setup() {
        r#"<form method="post" action="/reset" data-api="/api/reset"><button class="btn-ghost" type="submit">Reset</button></form>"#
    } else {
        ""
    };

    INDEX_HTML
        .replace("{{RESET}}", reset)
        .replace("{{CONTENT}}", &content)
}

fn render_setup(today: NaiveDate) -> String {
    let mut presets = String::new();
    for days in PRESET_DAYS {
        let selected = if days == 30 { " selected" } else { "" };
        presets.push_str(&format!(r#"<option value="{days}"{selected}>{days} days</option>"#));
    }

    format!(
        r#"<section class="card setup">
      <h2>Start your habit tracker</h2>
      <form method="post" action="/setup" id="setup-form">
        <label>Start date <input type="date" name="start_date" value="{today}" required /></label>
        <label>Number of days <select name="total_days">{presets}</select></label>
        <label>Or enter custom days <input type="number" name="custom_days" min="1" max="{MAX_DAYS}" placeholder="Enter number..." /></label>
        <label>Habits, one per line <textarea name="habits" rows="4" placeholder="Exercise&#10;Reading&#10;Meditation" required></textarea></label>
        <button class="btn-primary" type="submit">Create tracker</button>
      </form>
    </section>"#
    )
}

fn render_tracker(state: &TrackerState, stats: &StatsResponse, today: NaiveDate) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<section class="card">
      <h2>Progress dashboard</h2>
      <div class="panel">
        <div class="stat"><span class="label">Total days</span><span class="value">{}</span></div>
        <div class="stat"><span class="label">Completed days</span><span class="value">{}</span></div>
        <div class="stat"><span class="label">Completion</span><span class="value accent">{}%</span></div>
      </div>
    </section>"#,
        state.total_days, stats.completed_days, stats.progress_percentage
    ));

    html.push_str(&render_today(today_status(state, today)));

    html.push_str(&format!(
        r#"<section class="card">
      <div class="row"><span>Overall progress</span><span class="muted">{} of {} completed</span></div>
      <div class="bar"><div class="fill" style="width: {}%"></div></div>
    </section>"#,
        stats.completed_cells, stats.total_cells, stats.progress_percentage
    ));

    html.push_str(&render_grid(state, today));
    html.push_str(&render_progress_panel(stats));
    html
}

fn render_today(status: Option<TodayStatus>) -> String {
    match status {
        Some(TodayStatus::InProgress {
            day,
            completed,
            total,
            all_done,
        }) => {
            let width = crate::stats::percentage(completed, total);
            let done = if all_done {
                r#"<p class="ok">All habits completed for today!</p>"#
            } else {
                ""
            };
            format!(
                r#"<section class="card">
      <div class="row"><span>Today's progress (Day {})</span><span class="muted">{completed} of {total} habits</span></div>
      <div class="bar"><div class="fill" style="width: {width}%"></div></div>
      {done}
    </section>"#,
                day + 1
            )
        }
        Some(TodayStatus::NotStarted { starts_on }) => format!(
            r#"<section class="card"><p class="muted center">Your challenge starts on {starts_on}</p></section>"#
        ),
        Some(TodayStatus::Finished) => {
            r#"<section class="card"><p class="muted center">Challenge completed!</p></section>"#.to_string()
        }
        None => String::new(),
    }
}

fn render_grid(state: &TrackerState, today: NaiveDate) -> String {
    let Some(start) = state.start_date else {
        return String::new();
    };
    let today_day = crate::stats::today_index(start, today);

    let mut head = String::from("<th>Habit</th>");
    for day in 0..state.total_days as usize {
        let class = if day as i64 == today_day { r#" class="today""# } else { "" };
        let date = date_for_day(start, day)
            .map(|date| date.format("%-m/%-d").to_string())
            .unwrap_or_default();
        head.push_str(&format!("<th{class}>Day {}<small>{date}</small></th>", day + 1));
    }

    let mut body = String::new();
    for (habit, name) in state.habits.iter().enumerate() {
        body.push_str(&format!("<tr><td class=\"name\">{}</td>", escape_html(name)));
        let row = state.completion_matrix.get(habit).map(Vec::as_slice).unwrap_or(&[]);
        for (day, done) in row.iter().enumerate() {
            let class = match (*done, day as i64 == today_day) {
                (true, true) => "cell done today",
                (true, false) => "cell done",
                (false, true) => "cell today",
                (false, false) => "cell",
            };
            let label = if *done { "Mark as incomplete" } else { "Mark as complete" };
            body.push_str(&format!(
                r#"<td><form method="post" action="/toggle/{habit}/{day}" data-api="/api/toggle" data-habit="{habit}" data-day="{day}"><button class="{class}" type="submit" aria-label="{label}">{}</button></form></td>"#,
                if *done { "&#10003;" } else { "" }
            ));
        }
        body.push_str("</tr>");
    }

    format!(
        r#"<section class="card">
      <div class="row"><h2>Habits</h2></div>
      <div class="grid-scroll"><table class="grid"><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table></div>
      <form class="add-habit" method="post" action="/habits" data-api="/api/habits">
        <input type="text" name="name" placeholder="e.g., Exercise, Reading, Meditation" required />
        <button class="btn-primary" type="submit">Add habit</button>
      </form>
    </section>"#
    )
}

fn render_progress_panel(stats: &StatsResponse) -> String {
    let status = match stats.streaks.status {
        StreakStatus::Strong => "strong",
        StreakStatus::Growing => "growing",
        StreakStatus::Low => "low",
    };

    let mut rows = String::new();
    for habit in &stats.per_habit {
        let trend = match habit.consistency {
            Consistency::Improving => "Improving",
            Consistency::Steady => "Steady",
            Consistency::Starting => "Starting",
        };
        rows.push_str(&format!(
            r#"<tr><td>{}</td><td><div class="bar small"><div class="fill" style="width: {}%"></div></div>{}%</td><td>{trend}</td><td>{}</td></tr>"#,
            escape_html(&habit.name),
            habit.progress,
            habit.progress,
            habit.active_days
        ));
    }

    format!(
        r#"<section class="card">
      <h2>Your progress</h2>
      <p class="encourage">{}</p>
      <div class="panel">
        <div class="stat"><span class="label">Current streak</span><span class="value streak-{status}">{} days</span></div>
        <div class="stat"><span class="label">Best streak</span><span class="value">{} days</span></div>
      </div>
      <table class="habits"><thead><tr><th>Habit</th><th>Progress</th><th>Consistency</th><th>Active days</th></tr></thead><tbody>{rows}</tbody></table>
      <div class="row">
        <h3>Weekly activity</h3>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-week="this">This week</button>
          <button class="tab" type="button" data-week="last">Last week</button>
        </div>
      </div>
      <div id="weekly" class="weekly">{}</div>
    </section>"#,
        escape_html(&stats.encouragement),
        stats.streaks.current,
        stats.streaks.best,
        render_weekly(stats)
    )
}

fn render_weekly(stats: &StatsResponse) -> String {
    if stats.weekly_activity.is_empty() {
        return r#"<p class="muted">No activity this week yet.</p>"#.to_string();
    }
    let max = stats
        .weekly_activity
        .iter()
        .map(|point| point.count)
        .max()
        .unwrap_or(1);
    let mut html = String::new();
    for point in &stats.weekly_activity {
        html.push_str(&format!(
            r#"<div class="week-bar"><span>{}</span><div class="bar"><div class="fill" style="width: {}%"></div></div><span>{}</span></div>"#,
            point.day,
            crate::stats::percentage(point.count, max),
            point.count
        ));
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Habit Tracker</title>
  <style>
    :root {
      --bg-1: #f3f7f1;
      --ink: #23302a;
      --accent: #10b981;
      --accent-2: #2f4858;
      --muted: #6b7a72;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 18px 40px rgba(47, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #e7f5ee 60%, #f7faf8 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 16px 24px;
      background: white;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    h1 {
      margin: 0;
      font-size: 1.3rem;
    }

    h2, h3 {
      margin: 0 0 12px;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 24px 16px 48px;
      display: grid;
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .setup {
      max-width: 460px;
      margin: 0 auto;
      width: 100%;
    }

    .setup form {
      display: grid;
      gap: 16px;
    }

    label {
      display: grid;
      gap: 6px;
      font-weight: 600;
    }

    input, select, textarea {
      font: inherit;
      padding: 10px 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .stat {
      background: white;
      border-radius: 14px;
      padding: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .value.accent, .streak-strong {
      color: var(--accent);
    }

    .streak-growing {
      color: #d97706;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      margin-bottom: 8px;
    }

    .muted {
      color: var(--muted);
    }

    .center {
      text-align: center;
    }

    .ok, .encourage {
      color: var(--accent);
      font-weight: 600;
    }

    .bar {
      width: 100%;
      height: 10px;
      background: rgba(47, 72, 88, 0.1);
      border-radius: 999px;
      overflow: hidden;
    }

    .bar.small {
      display: inline-block;
      width: 80px;
      margin-right: 8px;
    }

    .fill {
      height: 100%;
      background: var(--accent);
      border-radius: 999px;
    }

    button {
      appearance: none;
      border: none;
      font: inherit;
      cursor: pointer;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
    }

    .btn-ghost {
      background: transparent;
      color: var(--muted);
      padding: 6px 10px;
      border-radius: 8px;
    }

    .grid-scroll {
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
    }

    .grid th, .grid td {
      padding: 4px;
      text-align: center;
      font-size: 0.8rem;
    }

    .grid th small {
      display: block;
      color: var(--muted);
    }

    .grid th.today {
      background: #d1fae5;
    }

    .grid td.name {
      text-align: left;
      font-weight: 600;
      white-space: nowrap;
    }

    .cell {
      width: 28px;
      height: 28px;
      border-radius: 6px;
      border: 2px solid #cbd5e1;
      background: white;
      color: white;
    }

    .cell.today {
      border-color: var(--accent);
    }

    .cell.done {
      background: var(--accent);
      border-color: var(--accent);
    }

    .add-habit {
      display: flex;
      gap: 8px;
      margin-top: 12px;
    }

    .habits {
      width: 100%;
      margin: 12px 0;
    }

    .habits th, .habits td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 4px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border-radius: 999px;
      padding: 6px 12px;
      font-weight: 600;
      color: var(--muted);
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
    }

    .week-bar {
      display: grid;
      grid-template-columns: 48px 1fr 32px;
      align-items: center;
      gap: 8px;
      margin-bottom: 6px;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .hint {
      text-align: center;
      color: var(--muted);
      font-size: 0.85rem;
    }
  </style>
</head>
<body>
  <header>
    <h1>Daily Habit Tracker</h1>
    {{RESET}}
  </header>
  <main>
    <div class="status" id="status"></div>
    {{CONTENT}}
    <p class="hint">Your progress is saved automatically after every change.</p>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const weeklyEl = document.getElementById('weekly');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const post = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    document.querySelectorAll('form[data-api]').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        let body = {};
        if (form.dataset.habit !== undefined) {
          body = { habit: Number(form.dataset.habit), day: Number(form.dataset.day) };
        } else if (form.elements.name) {
          body = { name: form.elements.name.value };
        }
        post(form.dataset.api, body)
          .then(() => window.location.reload())
          .catch((err) => setStatus(err.message, 'error'));
      });
    });

    const renderWeek = (points) => {
      if (!points.length) {
        weeklyEl.innerHTML = '<p class="muted">No activity this week yet.</p>';
        return;
      }
      const max = Math.max(...points.map((point) => point.count));
      weeklyEl.innerHTML = points
        .map((point) => `<div class="week-bar"><span>${point.day}</span><div class="bar"><div class="fill" style="width: ${Math.round(point.count / max * 100)}%"></div></div><span>${point.count}</span></div>`)
        .join('');
    };

    tabs.forEach((button) => {
      button.addEventListener('click', async () => {
        tabs.forEach((tab) => tab.classList.toggle('active', tab === button));
        try {
          const res = await fetch(`/api/stats?week=${button.dataset.week}`);
          if (!res.ok) {
            throw new Error('Unable to load stats');
          }
          renderWeek((await res.json()).weekly_activity);
        } catch (err) {
          setStatus(err.message, 'error');
        }
      });
    });
  </script>
</body>
</html>
"#;
