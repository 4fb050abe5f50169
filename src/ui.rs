use crate::models::ClientSummary;
use crate::render::{AdminPanelView, ChecklistView, ClientView};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Everything the admin console shows in one render.
#[derive(Debug)]
pub struct AdminPage {
    /// `Err` carries the message shown in place of the client list.
    pub clients: Result<Vec<ClientSummary>, String>,
    pub panel: Option<AdminPanelView>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl Default for AdminPage {
    fn default() -> Self {
        Self {
            clients: Ok(Vec::new()),
            panel: None,
            notice: None,
            error: None,
        }
    }
}

pub fn render_index(error: Option<&str>) -> String {
    let alert = error
        .map(|message| format!(r#"<p class="alert" role="alert">{}</p>"#, escape(message)))
        .unwrap_or_default();
    let body = INDEX_BODY.replace("{{ALERT}}", &alert);
    layout("Track your order", &body)
}

pub fn render_client_page(code: &str, view: &ChecklistView) -> String {
    let panel = match view {
        ChecklistView::Error { message } => {
            format!(r#"<p class="alert" role="alert">{}</p>"#, escape(message))
        }
        ChecklistView::Ready(client) => client_panel(client),
    };
    let body = CLIENT_BODY
        .replace("{{CODE}}", &escape(code))
        .replace("{{PANEL}}", &panel);
    layout(&format!("Order {code}"), &body)
}

fn client_panel(client: &ClientView) -> String {
    let name = if client.name.is_empty() { "Client" } else { client.name.as_str() };
    let service = if client.service.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="muted">Service: {}</p>"#, escape(&client.service))
    };

    let legacy = match &client.status {
        Some(status) => {
            let step = client
                .step
                .as_deref()
                .map(|step| format!("<p><strong>Current step:</strong> {}</p>", escape(step)))
                .unwrap_or_default();
            format!("<p><strong>Status:</strong> {}</p>{step}", escape(status))
        }
        None => String::new(),
    };

    let steps: String = client
        .steps
        .iter()
        .map(|step| {
            format!(
                r#"<li class="{class}"><span class="step-badge">{index}</span><span class="step-text">{name}</span><span class="step-state">{glyph}</span></li>"#,
                class = if step.done { "done" } else { "" },
                index = step.index,
                name = escape(&step.name),
                glyph = step.done_glyph,
            )
        })
        .collect();

    let summary = client
        .summary
        .as_deref()
        .map(|summary| format!(r#"<p id="progress-text">{}</p>"#, escape(summary)))
        .unwrap_or_default();

    let details = client
        .details
        .as_deref()
        .map(|details| format!(r#"<p class="muted notes">{}</p>"#, escape(details)))
        .unwrap_or_default();

    format!(
        r#"<h2 id="client-name">{name}</h2>{service}{legacy}
<div class="progress-head"><span>Progress</span><span id="progress-pct">{percent}%</span></div>
<div class="progress"><div class="progress-bar {class}" style="width:{percent}%;background:{gradient}"></div></div>
{summary}
<ul class="checklist">{steps}</ul>
{details}"#,
        name = escape(name),
        percent = client.bar_percent(),
        class = client.color.css_class(),
        gradient = client.color.gradient(),
    )
}

pub fn render_admin_page(page: &AdminPage) -> String {
    let mut flash = String::new();
    if let Some(notice) = &page.notice {
        flash.push_str(&format!(r#"<p class="notice" role="status">{}</p>"#, escape(notice)));
    }
    if let Some(error) = &page.error {
        flash.push_str(&format!(r#"<p class="alert" role="alert">{}</p>"#, escape(error)));
    }

    let clients = match &page.clients {
        Err(message) => format!(r#"<p class="alert">{}</p>"#, escape(message)),
        Ok(list) if list.is_empty() => r#"<p class="muted">No clients yet</p>"#.to_string(),
        Ok(list) => list
            .iter()
            .map(|client| {
                format!(
                    r#"<a class="client-item" href="/admin?client={href}">{name} — {code}</a>"#,
                    href = encode(&client.code),
                    name = escape(&client.name),
                    code = escape(&client.code),
                )
            })
            .collect(),
    };

    let panel = page.panel.as_ref().map(admin_panel).unwrap_or_default();
    let body = ADMIN_BODY
        .replace("{{FLASH}}", &flash)
        .replace("{{CLIENTS}}", &clients)
        .replace("{{PANEL}}", &panel);
    layout("Admin console", &body)
}

fn admin_panel(panel: &AdminPanelView) -> String {
    let view = match panel {
        AdminPanelView::Error { code, message } => {
            return format!(
                r#"<section class="card" id="client-panel"><h3>Client: {}</h3><p class="muted">{}</p></section>"#,
                escape(code),
                escape(message)
            );
        }
        AdminPanelView::Ready(view) => view,
    };
    let code = encode(&view.code);

    let steps: String = view
        .steps
        .iter()
        .map(|step| {
            format!(
                r#"<li class="{class}"><span class="step-badge">•</span><span class="step-text">{name}</span>
<form method="post" action="/admin/client/{code}/toggle"><input type="hidden" name="step" value="{value}"><button class="admin-action">{label}</button></form>
<a class="admin-action danger" href="/admin/client/{code}/delete?step={step_href}">delete</a></li>"#,
                class = if step.done { "done" } else { "" },
                name = escape(&step.name),
                value = escape(&step.name),
                label = step.toggle_label,
                step_href = encode(&step.name),
            )
        })
        .collect();

    format!(
        r#"<section class="card" id="client-panel">
<h3>Client: {code_text}</h3>
<p class="muted">{name} · {service}</p>
<p>{summary}</p>
<ul class="checklist">{steps}</ul>
<form method="post" action="/admin/client/{code}/steps" class="inline">
<input name="step" placeholder="Step name" required>
<button>Add step</button>
</form>
</section>"#,
        code_text = escape(&view.code),
        name = escape(&view.name),
        service = escape(&view.service),
        summary = escape(&view.summary),
    )
}

pub fn render_delete_confirm(code: &str, step: &str) -> String {
    let body = DELETE_BODY
        .replace("{{CODE_HREF}}", &encode(code))
        .replace("{{CODE}}", &escape(code))
        .replace("{{STEP}}", &escape(step));
    layout("Delete step", &body)
}

/// Percent-encodes a value for use in a path segment or query string.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

fn layout(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{BODY}}", body)
}

const INDEX_BODY: &str = r#"<section class="card">
  <h1>Track your order</h1>
  <p class="muted">Enter the tracking code you received.</p>
  {{ALERT}}
  <form method="get" action="/track" class="inline">
    <input id="codeInput" name="code" placeholder="Tracking code" autocomplete="off">
    <button>Track</button>
  </form>
</section>"#;

const CLIENT_BODY: &str = r#"<section class="card">
  <p class="muted">Tracking code <strong>{{CODE}}</strong> · <a href="/">track another order</a></p>
  {{PANEL}}
</section>"#;

const ADMIN_BODY: &str = r#"<section class="card">
  <h1>Admin console</h1>
  {{FLASH}}
  <div id="clients-list">{{CLIENTS}}</div>
  <form method="post" action="/admin/clients" class="inline">
    <input name="name" placeholder="Client name" required>
    <input name="service" placeholder="Service">
    <button>Add client</button>
  </form>
</section>
{{PANEL}}"#;

const DELETE_BODY: &str = r#"<section class="card">
  <h1>Delete step?</h1>
  <p>Step <strong>{{STEP}}</strong> will be removed from client <strong>{{CODE}}</strong>. This cannot be undone.</p>
  <form method="post" action="/admin/client/{{CODE_HREF}}/delete" class="inline">
    <input type="hidden" name="step" value="{{STEP}}">
    <input type="hidden" name="confirm" value="yes">
    <button class="danger">Delete</button>
    <a href="/admin?client={{CODE_HREF}}">Cancel</a>
  </form>
</section>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --ink: #1f2937;
      --muted: #6b7280;
      --blue-600: #2563eb;
      --card: #ffffff;
      --shadow: 0 16px 40px rgba(30, 58, 138, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #eef2ff, #f8fafc 60%);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      align-content: start;
      gap: 20px;
      padding: 32px 18px 48px;
    }

    .card {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    .muted {
      color: var(--muted);
    }

    .alert {
      color: #c00;
      font-weight: 600;
    }

    .notice {
      color: #166534;
      font-weight: 600;
    }

    form.inline {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      margin-top: 12px;
    }

    input {
      flex: 1;
      padding: 10px 12px;
      border: 1px solid #d1d5db;
      border-radius: 10px;
      font-size: 1rem;
    }

    button, .admin-action {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      background: var(--blue-600);
      color: white;
      font-weight: 600;
      cursor: pointer;
      text-decoration: none;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .danger {
      background: #dc2626;
    }

    .progress-head {
      display: flex;
      justify-content: space-between;
      font-weight: 600;
    }

    .progress {
      height: 12px;
      border-radius: 999px;
      background: #e5e7eb;
      overflow: hidden;
      margin: 8px 0;
    }

    .progress-bar {
      height: 100%;
      transition: width 300ms ease;
    }

    .checklist {
      list-style: none;
      padding: 0;
      display: grid;
      gap: 8px;
    }

    .checklist li {
      display: flex;
      align-items: center;
      gap: 12px;
      padding: 10px 12px;
      border-radius: 12px;
      background: #f3f4f6;
    }

    .checklist li.done {
      background: #ecfdf5;
    }

    .checklist form {
      margin: 0;
    }

    .step-badge {
      width: 28px;
      height: 28px;
      display: grid;
      place-items: center;
      border-radius: 50%;
      background: var(--blue-600);
      color: white;
      font-size: 0.85rem;
    }

    .step-text {
      flex: 1;
    }

    .client-item {
      display: block;
      padding: 10px 12px;
      margin-bottom: 6px;
      border-radius: 10px;
      background: #f3f4f6;
      color: inherit;
      text-decoration: none;
    }
  </style>
</head>
<body>
{{BODY}}
<script>
  // One request per control: lock buttons while a form is in flight.
  document.querySelectorAll('form').forEach((form) => {
    form.addEventListener('submit', () => {
      form.querySelectorAll('button').forEach((button) => { button.disabled = true; });
    });
  });
  window.addEventListener('pageshow', () => {
    document.querySelectorAll('button').forEach((button) => { button.disabled = false; });
  });
</script>
</body>
</html>
"#;
