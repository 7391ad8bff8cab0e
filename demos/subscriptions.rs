//! Building, writing and reading back a feed subscription list.
//!
//! Run with: cargo run --example subscriptions

use opml::{from_str, to_string_pretty, Document, Outline, Url};
use std::error::Error;

fn feed(name: &str, xml_url: &str, html_url: &str) -> Result<Outline, Box<dyn Error>> {
    Ok(Outline::new(name)
        .with_type("rss")
        .with_xml_url(Url::parse(xml_url)?)
        .with_html_url(Url::parse(html_url)?))
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = Document::new("2.0");
    doc.title = Some("mySubscriptions.opml".to_string());
    doc.date_created = Some("Sat, 18 Jun 2005 12:11:52 GMT".parse()?);
    doc.owner_name = Some("Dave Winer".to_string());
    doc.outlines.push(
        Outline::new("Tech")
            .with_outline(feed(
                "Scripting News",
                "http://www.scripting.com/rss.xml",
                "http://www.scripting.com/",
            )?)
            .with_outline(feed(
                "Workbench",
                "http://www.cadenhead.org/workbench/rss.xml",
                "http://www.cadenhead.org/workbench/",
            )?),
    );
    doc.outlines.push(
        Outline::new("News").with_outline(feed(
            "NYT > Business",
            "http://www.nytimes.com/services/xml/rss/nyt/Business.xml",
            "http://www.nytimes.com/pages/business/index.html",
        )?),
    );

    let xml = to_string_pretty(&doc)?;
    println!("OPML output:\n{}\n", xml);

    // Feeds are the outlines that carry an xmlUrl, at any depth
    let decoded = from_str(&xml)?;
    let mut stack: Vec<&Outline> = decoded.outlines.iter().rev().collect();
    while let Some(outline) = stack.pop() {
        if let Some(url) = &outline.xml_url {
            println!("{:<20} {}", outline.text, url);
        }
        stack.extend(outline.outlines.iter().rev());
    }

    assert_eq!(decoded, doc);
    println!("\n✓ Round-trip successful ({} outlines)", decoded.outline_count());

    Ok(())
}
