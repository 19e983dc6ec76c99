use url::Url;

use crate::{
    extract::Scope,
    fields,
    listing::{JobListing, NA, clean_budget},
    page::Node,
};

/// Turns one tile into a [`JobListing`].
pub struct Assembler {
    origin: Url,
}

impl Assembler {
    pub const fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// `Ok(None)` when the tile has no title: skeleton placeholders and promos look like that.
    ///
    /// Errors only when the tile itself cannot be read.
    pub fn assemble<N: Node>(&self, node: &N) -> anyhow::Result<Option<JobListing>> {
        let text = node.text_content()?;
        let scope = Scope::new(node, &text);

        let Some(title) = fields::TITLE.resolve(&scope).filter(|t| t != NA) else {
            return Ok(None);
        };

        let url = fields::URL
            .resolve(&scope)
            .and_then(|href| self.absolutize(&href))
            .unwrap_or_else(|| NA.to_owned());
        let description = fields::DESCRIPTION.extract(&scope);
        let budget_info = clean_budget(&fields::BUDGET.extract(&scope));
        let payment_verified = fields::PAYMENT_VERIFIED.detect(&scope);
        let rating = fields::RATING.extract(&scope);

        Ok(Some(JobListing {
            title,
            url,
            description,
            budget_info,
            payment_verified,
            rating,
        }))
    }

    /// Resolves `href` against the site origin. Non-web schemes are dropped.
    pub fn absolutize(&self, href: &str) -> Option<String> {
        let url = self.origin.join(href.trim()).ok()?;
        matches!(url.scheme(), "http" | "https").then(|| url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Page, Snapshot};

    fn assembler() -> Assembler {
        Assembler::new(Url::parse("https://www.upwork.com").unwrap())
    }

    fn first_tile(html: &str) -> Option<JobListing> {
        let page = Snapshot::parse(html.to_owned());
        let tile = page.select_all("article").unwrap()[0];
        assembler().assemble(&tile).unwrap()
    }

    #[test]
    fn relative_links_become_absolute() {
        let a = assembler();
        assert_eq!(
            a.absolutize("/jobs/Rust_~01abc/").as_deref(),
            Some("https://www.upwork.com/jobs/Rust_~01abc/")
        );
        assert_eq!(
            a.absolutize("https://example.org/jobs/1").as_deref(),
            Some("https://example.org/jobs/1")
        );
        assert_eq!(a.absolutize("javascript:void(0)"), None);
    }

    #[test]
    fn full_tile() {
        let job = first_tile(
            r#"<article>
                <h3 class="job-tile-title"><a href="/jobs/~01">  Build a  crawler </a></h3>
                <div data-test="job-description-text">Need a Rust dev.</div>
                <ul class="job-type"><li>Hourly:
                    $30-$60</li></ul>
                <span class="payment-verified">ok</span>
                <span class="up-rating-score">4.7</span>
            </article>"#,
        )
        .unwrap();
        assert_eq!(job.title, "Build a  crawler");
        assert_eq!(job.url, "https://www.upwork.com/jobs/~01");
        assert_eq!(job.description, "Need a Rust dev.");
        assert_eq!(job.budget_info, "Hourly: $30-$60");
        assert!(job.payment_verified);
        assert_eq!(job.rating, "4.7");
    }

    #[test]
    fn missing_fields_are_sentinels() {
        let job = first_tile(
            r#"<article><h4 class="job-tile-title"><span><a>Logo design</a></span></h4></article>"#,
        )
        .unwrap();
        assert_eq!(job.title, "Logo design");
        assert_eq!(job.url, NA);
        assert_eq!(job.description, NA);
        assert_eq!(job.budget_info, NA);
        assert!(!job.payment_verified);
        assert_eq!(job.rating, NA);
    }

    #[test]
    fn budget_falls_back_to_cost_phrases() {
        let job = first_tile(
            r#"<article>
                <a data-test="job-title-link" href="/jobs/~02">Scraper</a>
                <small>Fixed-price: $500</small><small>Est. Budget: $1,000</small>
            </article>"#,
        )
        .unwrap();
        assert_eq!(job.budget_info, "Fixed-price: $500 | Est. Budget: $1,000");
        assert_eq!(job.url, "https://www.upwork.com/jobs/~02");
    }

    #[test]
    fn long_budget_is_truncated() {
        let long = "x".repeat(180);
        let job = first_tile(&format!(
            r#"<article><h3 class="job-tile-title"><a>T</a></h3>
               <div class="job-type-info">{long}</div></article>"#
        ))
        .unwrap();
        assert_eq!(job.budget_info, format!("{}...", &long[..100]));
    }

    #[test]
    fn spanish_phrase_marks_verified() {
        let job = first_tile(
            r#"<article><h3 class="job-tile-title"><a>T</a></h3><div>Pago verificado</div></article>"#,
        )
        .unwrap();
        assert!(job.payment_verified);
    }

    #[test]
    fn rating_tiers_in_order() {
        let aria = first_tile(
            r#"<article><h3 class="job-tile-title"><a>T</a></h3>
               <div aria-label="Rating is 4.8 out of 5 stars"></div>
               <p>Proposals: 1.5 per day</p></article>"#,
        )
        .unwrap();
        assert_eq!(aria.rating, "4.8");

        let loose = first_tile(
            r#"<article><h3 class="job-tile-title"><a>T</a></h3>
               <p>Client score 5.0 from 12 reviews</p></article>"#,
        )
        .unwrap();
        assert_eq!(loose.rating, "5.0");

        let widget_out_of_range = first_tile(
            r#"<article><h3 class="job-tile-title"><a>T</a></h3>
               <span class="up-rating-score">9.9</span><p>avg 2.3 hrs</p></article>"#,
        )
        .unwrap();
        assert_eq!(widget_out_of_range.rating, "2.3");
    }

    #[test]
    fn untitled_tile_is_dropped() {
        assert_eq!(
            first_tile(
                r#"<article><a href="/jobs/~9">no heading</a><ul class="job-type">Hourly</ul>
                   <span class="payment-verified"></span></article>"#
            ),
            None
        );
    }
}
