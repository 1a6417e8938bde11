//! Server-rendered HTML for the browser session pages.

use taskgate_models::Task;

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
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

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body
    )
}

pub fn login_page() -> String {
    page(
        "Log in",
        r##"<h1>Log in</h1>
<form hx-post="/login" hx-target="#login-error">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>
<div id="login-error"></div>"##,
    )
}

pub fn todos_page(email: &str, tasks: &[Task]) -> String {
    let items = if tasks.is_empty() {
        "<p>No tasks yet.</p>".to_string()
    } else {
        let rows: String = tasks
            .iter()
            .map(|task| {
                format!(
                    "<li data-task-id=\"{}\"><input type=\"checkbox\" disabled{}> <strong>{}</strong> {}</li>\n",
                    task.id,
                    if task.completed { " checked" } else { "" },
                    escape_html(&task.title),
                    escape_html(&task.description)
                )
            })
            .collect();
        format!("<ul>\n{}</ul>", rows)
    };

    page(
        "Todos",
        &format!(
            "<h1>Todos</h1>\n<p>Signed in as {}</p>\n{}",
            escape_html(email),
            items
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_todos_page_escapes_task_content() {
        let task = Task::new(Uuid::new_v4(), "<b>bold</b>", "");
        let html = todos_page("a@x.com", &[task]);

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_login_page_posts_to_login() {
        assert!(login_page().contains(r#"hx-post="/login""#));
    }
}
