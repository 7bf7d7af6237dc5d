//! HTML mail bodies. Placeholders look like `{{name}}` and are filled by [`render`].

pub const APPLICANT_CONFIRMATION_SUBJECT: &str = "We received your application to {{clubName}}";
pub const ADMIN_NOTIFICATION_SUBJECT: &str = "New membership application: {{name}}";
pub const WELCOME_SUBJECT: &str = "Welcome to {{clubName}}!";

pub const APPLICANT_CONFIRMATION: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #2563eb;">Thank you for applying, {{name}}!</h2>
  <p>We have received your application to join <strong>{{clubName}}</strong>. Our committee reviews
  applications regularly and will get back to you soon.</p>
  <table style="border-collapse: collapse; width: 100%;">
    <tr><td style="padding: 4px 0;"><strong>Student index ID</strong></td><td>{{studentIndexId}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Faculty</strong></td><td>{{faculty}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Year</strong></td><td>{{year}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Interests</strong></td><td>{{interests}}</td></tr>
  </table>
  <p>In the meantime, join our community to hear about upcoming events:</p>
  <p><a href="{{communityLink}}" style="background: #2563eb; color: #ffffff; padding: 10px 18px; text-decoration: none; border-radius: 4px;">Join the community</a></p>
  <p style="font-size: 12px; color: #6b7280;">Submitted on {{timestamp}}</p>
</body>
</html>
"#;

pub const ADMIN_NOTIFICATION: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 600px; margin: 0 auto;">
  <h2>New membership application</h2>
  <table style="border-collapse: collapse; width: 100%;">
    <tr><td style="padding: 4px 0;"><strong>Name</strong></td><td>{{name}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Email</strong></td><td>{{email}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Student index ID</strong></td><td>{{studentIndexId}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Faculty</strong></td><td>{{faculty}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Year</strong></td><td>{{year}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Interests</strong></td><td>{{interests}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Message</strong></td><td>{{message}}</td></tr>
    <tr><td style="padding: 4px 0;"><strong>Submitted</strong></td><td>{{timestamp}}</td></tr>
  </table>
  <p>Review it from the admin dashboard.</p>
</body>
</html>
"#;

pub const WELCOME: &str = r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2937; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #16a34a;">Welcome aboard, {{name}}!</h2>
  <p>Your application to <strong>{{clubName}}</strong> has been approved.</p>
  <p><a href="{{communityLink}}" style="background: #16a34a; color: #ffffff; padding: 10px 18px; text-decoration: none; border-radius: 4px;">Join the community</a></p>
</body>
</html>
"#;

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// Single pass: inserted values are never scanned for placeholders again.
fn fill(template: &str, values: &[(&str, &str)], escape: bool) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let value = after
            .find("}}")
            .and_then(|end| values.iter().find(|(k, _)| *k == &after[..end]).map(|(_, v)| (end, *v)));
        match value {
            Some((end, v)) if escape => {
                out.push_str(&escape_html(v));
                rest = &after[end + 2..];
            }
            Some((end, v)) => {
                out.push_str(v);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Replaces every `{{key}}` with the escaped value. Unknown placeholders are left as is.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    fill(template, values, true)
}

/// Same as [`render`] for plain-text fields such as subjects; nothing is escaped.
pub fn render_plain(template: &str, values: &[(&str, &str)]) -> String {
    fill(template, values, false)
}
