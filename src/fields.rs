//! Selectors and patterns for the job feed, grouped by field.
//!
//! The feed's markup changes between rollouts and A/B buckets. When a field goes
//! missing, save the page with `--debug-dump`, find the new markup and add a
//! strategy here; keep older entries unless they start matching the wrong thing.
//! Order inside every list is priority order.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{Evidence, Field, Flag, Strategy};

/// Tile containers, most likely layout first. Only the first list that matches is used.
pub const CONTAINERS: &[&str] = &[
    "article",
    ".up-card-section",
    "section.air3-card-section",
    r#"div[data-test="job-tile-list"] > section"#,
    ".job-tile",
    ".up-card-list-section",
];

/// Plausible client rating: one decimal between 0.0 and 5.0.
pub static RATING_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-4]\.\d|5\.0)\b").unwrap());

/// Cost phrases such as `Hourly: $10-$30`, `Fixed-price: $500`, `Est. Budget: $1,000`.
pub static COST_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Hourly|Fixed-price|Est\. Budget).*?\$[\d,]+(?:-\$[\d,]+)?").unwrap()
});

pub static TITLE: LazyLock<Field> = LazyLock::new(|| {
    Field::new(
        "title",
        vec![
            Strategy::text("h3.job-tile-title a"),
            Strategy::text("h4.job-tile-title a"),
            Strategy::text(".job-title a"),
            Strategy::text(r#"a[data-test="job-title-link"]"#),
        ],
    )
});

/// Raw `href`; made absolute by the assembler.
pub static URL: LazyLock<Field> = LazyLock::new(|| {
    Field::new(
        "url",
        vec![
            Strategy::attr(r#"a[href*="/jobs/"], h3 a, h4 a"#, "href"),
            Strategy::attr(r#"a[data-test="job-title-link"]"#, "href"),
        ],
    )
});

pub static DESCRIPTION: LazyLock<Field> = LazyLock::new(|| {
    Field::new(
        "description",
        vec![
            Strategy::text(r#"[data-test="job-description-text"]"#),
            Strategy::text(".job-description"),
            Strategy::text(".air3-line-clamp"),
            Strategy::text("p.mb-0"),
        ],
    )
});

pub static BUDGET: LazyLock<Field> = LazyLock::new(|| {
    Field::new(
        "budget",
        vec![
            Strategy::text(r#"[data-test="job-type-label"]"#),
            Strategy::text("ul.job-type"),
            Strategy::text(r#"[data-test="job-type"]"#),
            Strategy::text(".job-type-info"),
            Strategy::full_text(COST_PHRASE.clone()).join_all(" | "),
        ],
    )
});

pub static PAYMENT_VERIFIED: LazyLock<Flag> = LazyLock::new(|| {
    Flag::new(
        "paymentVerified",
        vec![
            Evidence::Phrase(&["Payment verified", "Pago verificado"]),
            Evidence::Badge(".payment-verified, .verified-badge"),
        ],
    )
});

/// Three tiers: rating widget text, star `aria-label`, then any plausible decimal in the tile.
///
/// The last tier can pick up an unrelated number such as `$4.5`; it only runs when the
/// widget is missing entirely.
pub static RATING: LazyLock<Field> = LazyLock::new(|| {
    let value = || RATING_VALUE.clone();
    Field::new(
        "rating",
        vec![
            Strategy::text(".up-rating-score").matching(value()),
            Strategy::text(r#"[data-test="client-rating"]"#).matching(value()),
            Strategy::text(".air3-rating-value span").matching(value()),
            Strategy::text(".air3-rating-value-text").matching(value()),
            Strategy::text("span.air3-rating").matching(value()),
            Strategy::attr(r#"[aria-label*="star"], [aria-label*="rating"]"#, "aria-label")
                .matching(value()),
            Strategy::full_text(value()).collapsed(),
        ],
    )
});
