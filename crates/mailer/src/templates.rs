//! Subject lines and HTML bodies for outbound email.

/// Subject line of the password-reset email.
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset Request for Kelvisan Admin Account";

/// Render the password-reset email body for `reset_link`.
///
/// `valid_for_mins` is shown to the recipient as the link lifetime.
pub fn password_reset_html(reset_link: &str, valid_for_mins: i64) -> String {
    let link = escape_html(reset_link);
    let validity = describe_minutes(valid_for_mins);
    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
  <h2 style="color: #0056b3;">Password Reset Request</h2>
  <p>A password reset was requested for your Kelvisan admin account.</p>
  <p style="margin: 20px 0;">
    <a href="{link}" style="background-color: #007bff; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px; display: inline-block;">Reset Your Password</a>
  </p>
  <p>Or copy and paste this into your browser:</p>
  <p><code style="word-break: break-all;">{link}</code></p>
  <p>This link will expire in {validity}.</p>
  <p>If you did not request this, ignore this email and your password will remain unchanged.</p>
  <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;">
  <p style="font-size: 0.8em; color: #666;">This is an automated email, please do not reply.</p>
</div>"#
    )
}

fn describe_minutes(mins: i64) -> String {
    match mins {
        60 => "1 hour".to_string(),
        m if m > 0 && m % 60 == 0 => format!("{} hours", m / 60),
        1 => "1 minute".to_string(),
        m => format!("{m} minutes"),
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
