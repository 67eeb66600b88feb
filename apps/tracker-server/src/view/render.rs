//! HTML rendering of view models.

use std::fmt::Write;

use entities::COLOR_PALETTE;

use super::{NewUserView, ViewModel};

/// Escapes text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

/// Serializes the visited codes for the map script.
///
/// `<` is escaped so the JSON cannot close the surrounding script tag.
fn countries_json(countries: &[String]) -> String {
    serde_json::to_string(countries)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/styles/main.css\">\n\
         </head>\n<body>\n{body}</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Renders the main page: user tabs, add-country form and visited list.
pub fn render_index(view: &ViewModel) -> String {
    let mut body = String::new();

    body.push_str("<form class=\"tabs\" action=\"/user\" method=\"post\">\n");
    for user in &view.users {
        let active = if view.active_user_id == Some(user.id) {
            " active"
        } else {
            ""
        };
        let _ = writeln!(
            body,
            "<button type=\"submit\" name=\"user\" value=\"{id}\" class=\"tab{active}\" \
             style=\"background-color: {color}\">{name}</button>",
            id = user.id,
            color = escape_html(&user.color),
            name = escape_html(&user.name),
        );
    }
    body.push_str(
        "<button type=\"submit\" name=\"add\" value=\"new\" class=\"tab\">Add Family Member</button>\n\
         </form>\n",
    );

    body.push_str("<form class=\"add\" action=\"/add\" method=\"post\">\n");
    let placeholder = view.error.as_deref().unwrap_or("Enter country name");
    let _ = writeln!(
        body,
        "<input type=\"text\" name=\"country\" autofocus placeholder=\"{}\">",
        escape_html(placeholder)
    );
    let _ = writeln!(
        body,
        "<button type=\"submit\" style=\"background-color: {}\">Add</button>",
        escape_html(view.color.as_deref().unwrap_or("gray"))
    );
    body.push_str("</form>\n");

    if let Some(error) = &view.error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }

    let _ = writeln!(body, "<h2 class=\"total-count\">Total Countries: {}</h2>", view.total);
    body.push_str("<ul class=\"visited\">\n");
    for code in &view.countries {
        let _ = writeln!(body, "<li id=\"{code}\">{code}</li>", code = escape_html(code));
    }
    body.push_str("</ul>\n");

    let _ = writeln!(
        body,
        "<script>\nconst country_codes = {codes};\nconst color = {color};\n\
         country_codes.forEach(code => {{\n  const el = document.getElementById(code);\n  \
         if (el) el.style.fill = color;\n}});\n</script>",
        codes = countries_json(&view.countries),
        color = serde_json::to_string(view.color.as_deref().unwrap_or("gray"))
            .unwrap_or_else(|_| "\"gray\"".to_string())
            .replace('<', "\\u003c"),
    );

    page("Family Travel Tracker", &body)
}

/// Renders the new-user form with the colour palette.
pub fn render_new_user(view: &NewUserView) -> String {
    let mut body = String::new();

    body.push_str("<h1>Add a Family Member</h1>\n");
    if let Some(error) = &view.error {
        let _ = writeln!(body, "<p class=\"error\">{}</p>", escape_html(error));
    }

    body.push_str(
        "<form action=\"/new\" method=\"post\">\n\
         <input type=\"text\" name=\"name\" autofocus placeholder=\"Enter your name\">\n\
         <p>Pick a color:</p>\n",
    );
    for color in COLOR_PALETTE {
        let _ = writeln!(
            body,
            "<label><input type=\"radio\" name=\"color\" value=\"{color}\">\
             <span class=\"swatch\" style=\"background-color: {color}\"></span></label>"
        );
    }
    body.push_str("<button type=\"submit\">Add</button>\n</form>\n");

    page("Add a Family Member", &body)
}
