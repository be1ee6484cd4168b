//! HTML email template and shared formatting helpers.

use serde::Serialize;

use super::NotifyError;

/// Visual style of the email alert box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertTone {
    Success,
    Warning,
    Danger,
    Info,
}

impl AlertTone {
    fn colors(self) -> (&'static str, &'static str) {
        match self {
            AlertTone::Success => ("#d4edda", "#28a745"),
            AlertTone::Warning => ("#fff3cd", "#ffc107"),
            AlertTone::Danger => ("#f8d7da", "#dc3545"),
            AlertTone::Info => ("#cce7ff", "#007bff"),
        }
    }
}

#[derive(Serialize)]
struct EmailContext<'a> {
    title: &'a str,
    content: &'a str,
    background: &'static str,
    border: &'static str,
    cta_text: Option<&'a str>,
    cta_link: Option<&'a str>,
    portal_name: &'a str,
}

const EMAIL_TEMPLATE: &str = r#"<html>
  <head><meta charset="UTF-8"></head>
  <body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f5f5f5;">
    <div style="max-width: 600px; margin: 0 auto; background-color: white; border-radius: 12px; overflow: hidden;">
      <div style="background: #2c3e50; color: white; padding: 24px 20px; text-align: center;">
        <h1 style="margin: 0; font-size: 24px;">{{ portal_name }}</h1>
      </div>
      <div style="padding: 32px 28px;">
        <div style="background: {{ background }}; padding: 22px; border-radius: 10px; border-left: 6px solid {{ border }};">
          <h2 style="margin: 0 0 12px 0; color: #495057;">{{ title }}</h2>
          <div style="font-size: 15px; line-height: 1.8; white-space: pre-line;">{{ content }}</div>
        </div>
        {% if cta_text and cta_link %}
        <div style="text-align: center; margin: 28px 0 0 0;">
          <a href="{{ cta_link }}" style="display: inline-block; background: #2c3e50; color: white; padding: 14px 28px; text-decoration: none; border-radius: 24px; font-weight: 600;">{{ cta_text }}</a>
        </div>
        {% endif %}
      </div>
      <div style="background: #f8f9fa; padding: 20px 28px; text-align: center; border-top: 1px solid #e9ecef;">
        <p style="margin: 0; color: #6c757d; font-size: 13px;">
          This is an automated message from {{ portal_name }}.<br>
          Please do not reply to this email.
        </p>
      </div>
    </div>
  </body>
</html>"#;

/// Render the standard alert email body. The template is a fixed string, so
/// a fresh environment is created per render call.
pub fn alert_email_html(
    title: &str,
    content: &str,
    cta: Option<(&str, &str)>,
    tone: AlertTone,
) -> Result<String, NotifyError> {
    let (background, border) = tone.colors();
    let env = minijinja::Environment::new();
    env.render_str(
        EMAIL_TEMPLATE,
        EmailContext {
            title,
            content,
            background,
            border,
            cta_text: cta.map(|(text, _)| text),
            cta_link: cta.map(|(_, link)| link),
            portal_name: "Lending Portal",
        },
    )
    .map_err(|e| NotifyError::Template(e.to_string()))
}

/// Format a currency amount for display, tolerating the raw form values the
/// record store carries. Non-numeric input renders as `N/A`.
pub fn format_currency(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("n/a") || trimmed.eq_ignore_ascii_case("na")
    {
        return "N/A".to_string();
    }

    let cleaned: String = trimmed.replace('₹', "").replace(',', "").trim().to_string();

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => {
            format!("₹{}", group_thousands(amount as u64))
        }
        _ => "N/A".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
