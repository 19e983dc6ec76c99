// tests/extraction.rs
use jfs::{
    assemble::Assembler,
    harvest::harvest,
    listing::{JobListing, NA},
    output::{Saved, Sink},
    page::Snapshot,
};
use url::Url;

fn assembler() -> Assembler {
    Assembler::new(Url::parse("https://www.upwork.com").unwrap())
}

fn run(html: &str) -> (jfs::harvest::Harvest, Snapshot) {
    let page = Snapshot::parse(html.to_owned());
    let result = harvest(&page, &assembler());
    (result, page)
}

fn tile(id: u32, extra: &str) -> String {
    format!(
        r#"<article data-ev-opening_uid="{id}">
            <h2 class="job-tile-title"><a href="/jobs/~0{id}/">placeholder</a></h2>
            <h3 class="job-tile-title"><a href="/jobs/~0{id}/">Job number {id}</a></h3>
            <div data-test="job-description-text">
                Looking for someone to build tool {id}.
            </div>
            <ul class="job-type"><li><strong>Hourly: $15-$40</strong></li></ul>
            {extra}
        </article>"#
    )
}

fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Find work</title></head><body><main>{body}</main></body></html>")
}

#[test]
fn three_tiles_with_one_rated() {
    let body = [
        tile(1, ""),
        tile(
            2,
            r#"<span class="verified-badge">✓</span>
               <div class="air3-rating" aria-label="4.8 out of 5 stars"><svg></svg></div>"#,
        ),
        tile(3, ""),
    ]
    .concat();
    let (result, _) = run(&page(&body));

    assert_eq!(result.selector, Some("article"));
    assert_eq!(result.listings.len(), 3);

    let rated = &result.listings[1];
    assert_eq!(
        rated,
        &JobListing {
            title: "Job number 2".into(),
            url: "https://www.upwork.com/jobs/~02/".into(),
            description: "Looking for someone to build tool 2.".into(),
            budget_info: "Hourly: $15-$40".into(),
            payment_verified: true,
            rating: "4.8".into(),
        }
    );

    for other in [&result.listings[0], &result.listings[2]] {
        assert_eq!(other.rating, NA);
        assert!(!other.payment_verified);
        assert!(other.has_url());
    }
    let titles: Vec<_> = result.listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Job number 1", "Job number 2", "Job number 3"]);
}

#[test]
fn no_tiles_yields_empty_output_and_dump() {
    let html = page(r#"<div class="error-page"><h1>Something went wrong</h1></div>"#);
    let (result, snapshot) = run(&html);
    assert!(result.no_containers());
    assert!(result.listings.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let sink = Sink::new(dir.path().join("out.json"), dir.path().join("debug_page.html"));
    let saved = sink.persist(&result, &snapshot).unwrap();
    assert_eq!(
        saved,
        Saved::NoContainers {
            output: sink.output.clone(),
            dump: sink.dump.clone(),
        }
    );
    assert_eq!(std::fs::read_to_string(&sink.dump).unwrap(), html);
    let written: Vec<JobListing> =
        serde_json::from_str(&std::fs::read_to_string(&sink.output).unwrap()).unwrap();
    assert!(written.is_empty());
}

#[test]
fn untitled_tile_is_left_out() {
    let untitled = r#"<article>
        <div data-test="job-description-text">Skeleton tile</div>
        <ul class="job-type"><li>Fixed-price: $300</li></ul>
        <span class="payment-verified"></span>
        <span class="up-rating-score">5.0</span>
    </article>"#;
    let (result, _) = run(&page(&[untitled, tile(7, "").as_str()].concat()));

    assert_eq!(result.containers, 2);
    assert_eq!(result.listings.len(), 1);
    assert_eq!(result.listings[0].title, "Job number 7");
    assert_eq!(result.skipped(), 1);
}

#[test]
fn later_layout_is_found_when_earlier_ones_are_absent() {
    let body = r#"<div data-test="job-tile-list">
        <section><h4 class="job-tile-title"><a href="/jobs/~a">Air3 one</a></h4></section>
        <section><h4 class="job-tile-title"><a href="/jobs/~b">Air3 two</a></h4></section>
    </div>
    <div class="job-tile"><h3 class="job-tile-title"><a>Legacy tile</a></h3></div>"#;
    let (result, _) = run(&page(body));

    assert_eq!(result.selector, Some(r#"div[data-test="job-tile-list"] > section"#));
    let titles: Vec<_> = result.listings.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Air3 one", "Air3 two"]);
}

#[test]
fn sentinels_only_for_unresolvable_fields() {
    let body = r#"<section class="air3-card-section">
        <a data-test="job-title-link" href="https://www.upwork.com/jobs/~c">Bare tile</a>
    </section>"#;
    let (result, _) = run(&page(body));

    assert_eq!(result.selector, Some("section.air3-card-section"));
    let job = &result.listings[0];
    assert_eq!(job.title, "Bare tile");
    assert_eq!(job.url, "https://www.upwork.com/jobs/~c");
    assert_eq!(job.description, NA);
    assert_eq!(job.budget_info, NA);
    assert_eq!(job.rating, NA);
    assert!(!job.payment_verified);
}
