//! Emitted SEO artifacts: sitemap, robots policy and structured data.

use crate::views::esc;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use joblens_core::Job;
use serde_json::{Value, json};

/// Sitemap covering the home page and every currently cached job.
///
/// Seeded from the job cache snapshot, so it is not a complete catalog and
/// may list only the home page.
pub fn sitemap_xml(origin: &str, jobs: &[Job]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url(&mut xml, origin, &now_stamp(), "daily", "1.0");
    for job in jobs {
        let loc = format!("{origin}/jobs/{}", job.slug);
        push_url(&mut xml, &loc, &lastmod(&job.posted_at), "daily", "0.8");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", esc(loc)));
    xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
    xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    xml.push_str(&format!("    <priority>{priority}</priority>\n"));
    xml.push_str("  </url>\n");
}

/// Last-modified stamp from a job's posting date, falling back to the
/// current time when the date does not parse.
fn lastmod(posted_at: &str) -> String {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(posted_at) {
        return stamp.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true);
    }
    if let Ok(date) = NaiveDate::parse_from_str(posted_at, "%Y-%m-%d") {
        return date.to_string();
    }
    now_stamp()
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Robots policy: all crawlers allowed, pointing at the sitemap.
pub fn robots_txt(origin: &str) -> String {
    format!("User-agent: *\nAllow: /\n\nSitemap: {origin}/sitemap.xml\n")
}

/// schema.org JobPosting structured data for a detail page.
///
/// The salary block is present only when both bounds are.
pub fn job_posting_ld(job: &Job, origin: &str) -> Value {
    let mut posting = json!({
        "@context": "https://schema.org",
        "@type": "JobPosting",
        "title": job.title,
        "datePosted": job.posted_at,
        "description": job.description,
        "hiringOrganization": {
            "@type": "Organization",
            "name": job.company,
        },
        "jobLocation": {
            "@type": "Place",
            "address": job.location,
        },
        "url": format!("{origin}/jobs/{}", job.slug),
        "sameAs": job.url,
    });

    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        posting["baseSalary"] = json!({
            "@type": "MonetaryAmount",
            "currency": job.salary_currency.as_deref().unwrap_or(""),
            "value": {
                "@type": "QuantitativeValue",
                "minValue": min,
                "maxValue": max,
                "unitText": job.salary_period.as_deref().unwrap_or(""),
            },
        });
    }

    posting
}
