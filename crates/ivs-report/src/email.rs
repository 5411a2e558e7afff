//! Supplier email summary.
//!
//! Built only from [`IssueCounters`]. Sections follow the sectioned report
//! order and are numbered consecutively, skipping those with nothing to say.

use ivs_model::{UrlStatus, fields};
use ivs_validate::IssueCounters;

const SIGN_OFF: &str = "VDB Marketplace Support Team";

/// Weight fields in the order the summary looks for problems.
const WEIGHT_FIELDS: [&str; 3] = [fields::CARAT, fields::WEIGHT, fields::CARAT_WEIGHT];

struct EmailBuilder {
    lines: Vec<String>,
    section: usize,
}

impl EmailBuilder {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            section: 0,
        }
    }

    fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Emit a numbered section if it has any bullet.
    fn section(&mut self, title: &str, bullets: Vec<String>) {
        if bullets.is_empty() {
            return;
        }
        self.section += 1;
        self.line(format!("{}. {title}", self.section));
        self.lines.extend(bullets);
        self.blank();
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Push `text` when `count` is non-zero.
fn bullet_if(bullets: &mut Vec<String>, count: usize, text: impl FnOnce(usize) -> String) {
    if count > 0 {
        bullets.push(text(count));
    }
}

fn value_examples(bullets: &mut Vec<String>, intro: &str, values: impl IntoIterator<Item = String>) {
    let mut values = values.into_iter().peekable();
    if values.peek().is_some() {
        bullets.push(intro.to_string());
        bullets.extend(values.map(|value| format!("  • {value}")));
    }
}

/// An empty link is reported both as a missing mandatory value and as
/// `NOT_PROVIDED`; count each item once.
fn missing_links(counters: &IssueCounters, field: &str) -> usize {
    counters
        .missing(field)
        .max(counters.url(field, UrlStatus::NotProvided))
}

/// Render the email body for a supplier.
pub fn build_email_body(supplier_name: &str, counters: &IssueCounters) -> String {
    let mut email = EmailBuilder::new();
    email.line(format!("Hi {},", supplier_name.trim()));
    email.blank();
    email.line("Hope you're doing well.");
    email.blank();
    email.line(
        "During a routine validation of your inventory on the VDB Marketplace, we identified a \
         few issues that need your attention. Please find the details below:",
    );
    email.blank();

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing(fields::STOCK_NUM), |n| {
        format!("- Stock number is missing for {n} item(s).")
    });
    email.section("Stock Number", bullets);

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing(fields::SHAPE), |n| {
        format!("- Shape is missing for {n} item(s).")
    });
    value_examples(
        &mut bullets,
        "- We found invalid shape values that do not match VDB's standardised shape list, for example:",
        counters.invalid_shapes.iter().cloned(),
    );
    email.section("Shape", bullets);

    let mut bullets = Vec::new();
    if let Some(field) = WEIGHT_FIELDS
        .into_iter()
        .find(|field| counters.problems(field) > 0)
    {
        bullet_if(&mut bullets, counters.missing(field), |n| {
            format!("- Weight ({field}) is missing for {n} item(s).")
        });
        bullet_if(&mut bullets, counters.invalid(field), |n| {
            format!(
                "- Weight ({field}) has invalid values (zero, negative, or out of range) for {n} item(s)."
            )
        });
    }
    email.section("Weight", bullets);

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing(fields::COLOR), |n| {
        format!("- Color is missing for {n} item(s).")
    });
    value_examples(
        &mut bullets,
        "- We found invalid color values that do not match VDB's standardised color list, for example:",
        counters.invalid_colors.iter().cloned(),
    );
    email.section("Color", bullets);

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing(fields::CLARITY), |n| {
        format!("- Clarity is missing for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.invalid(fields::CLARITY), |n| {
        format!("- Clarity has invalid values for {n} item(s).")
    });
    email.section("Clarity", bullets);

    for (field, label, noun) in [
        (fields::IMAGE_URL_1, "Image", "image"),
        (fields::VIDEO_URL_1, "Video", "video"),
    ] {
        let mut bullets = Vec::new();
        bullet_if(&mut bullets, missing_links(counters, field), |n| {
            format!("- {label} URLs are missing for {n} item(s).")
        });
        bullet_if(&mut bullets, counters.url(field, UrlStatus::NotWorking), |n| {
            format!("- {n} {noun} URL(s) are not working (HTTP errors).")
        });
        email.section(&format!("{label} URLs"), bullets);
    }

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, missing_links(counters, fields::CERT_URL_1), |n| {
        format!("- Certificate URLs are missing for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.bad_format(fields::CERT_URL_1), |n| {
        format!("- {n} certificate URL(s) do not link to a certificate document (PDF).")
    });
    email.section("Certificate URLs", bullets);

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing(fields::PRICE_PER_CARAT), |n| {
        format!("- Price per carat is missing for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.missing(fields::TOTAL_SALES_PRICE), |n| {
        format!("- Total sales price is missing for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.invalid(fields::PRICE_PER_CARAT), |n| {
        format!("- Price per carat has invalid values (zero or negative) for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.invalid(fields::TOTAL_SALES_PRICE), |n| {
        format!("- Total sales price has invalid values (zero or negative) for {n} item(s).")
    });
    bullet_if(&mut bullets, counters.price_mismatch, |n| {
        format!(
            "- For {n} item(s), Total Sales Price does not match (Carat x Price Per Carat)."
        )
    });
    email.section("Price", bullets);

    let mut bullets = Vec::new();
    bullet_if(&mut bullets, counters.missing_cut_grade, |n| {
        format!("- Cut grade information is missing for {n} item(s).")
    });
    email.section("Other Issues (Cut Grade)", bullets);

    email.line(
        "A spreadsheet outlining the above items has been attached for your reference. We would \
         appreciate it if you could make the necessary corrections at your earliest convenience.",
    );
    email.blank();
    email.line(
        "If you have any questions or need further clarification, feel free to reach out. We'll \
         be happy to assist.",
    );
    email.blank();
    email.line("Best Regards,");
    email.line(SIGN_OFF);
    email.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sections_when_clean() {
        let body = build_email_body("Acme", &IssueCounters::default());
        assert!(body.starts_with("Hi Acme,\n"));
        assert!(body.ends_with("Best Regards,\nVDB Marketplace Support Team"));
        assert!(!body.contains("1. "));
    }

    #[test]
    fn test_sections_numbered_consecutively() {
        let mut counters = IssueCounters::default();
        counters.missing_by_field.insert("color".into(), 2);
        counters.missing_cut_grade = 1;

        let body = build_email_body("Acme", &counters);
        assert!(body.contains("1. Color\n- Color is missing for 2 item(s)."));
        assert!(body.contains("2. Other Issues (Cut Grade)"));
        assert!(!body.contains("3. "));
    }

    #[test]
    fn test_empty_link_counted_once() {
        let mut counters = IssueCounters::default();
        counters.missing_by_field.insert("image_url_1".into(), 3);
        counters
            .url_by_field
            .entry("image_url_1".into())
            .or_default()
            .insert(UrlStatus::NotProvided, 3);

        let body = build_email_body("Acme", &counters);
        assert!(body.contains("- Image URLs are missing for 3 item(s)."));
    }

    #[test]
    fn test_weight_uses_first_field_with_problems() {
        let mut counters = IssueCounters::default();
        counters.invalid_by_field.insert("carat_weight".into(), 4);

        let body = build_email_body("Acme", &counters);
        assert!(body.contains("- Weight (carat_weight) has invalid values"));
    }
}
