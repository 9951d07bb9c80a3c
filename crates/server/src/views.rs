//! Server-rendered HTML views.
//!
//! Plain string builders; no template engine. Every interpolated value
//! from user input or the upstream API goes through [`esc`], except job
//! descriptions, which upstream supplies as display HTML and which are
//! rendered verbatim.

use crate::seo;
use joblens_core::{AppConfig, Job, SearchCriteria};
use joblens_client::SearchResponse;

/// Escape a string for use in HTML text or attribute position.
pub fn esc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

fn layout(config: &AppConfig, title: &str, description: &str, head_extra: &str, body: &str) -> String {
    let ad_slot = match &config.ad_slot_id {
        // Filled in client-side by the ad loader; the server only marks the slot.
        Some(slot) => format!(r#"<div class="ad-slot" data-ad-slot="{}"></div>"#, esc(slot)),
        None => String::new(),
    };

    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <meta name=\"description\" content=\"{description}\">\n\
         <title>{title}</title>\n\
         {head_extra}\
         </head>\n\
         <body>\n\
         <header><a href=\"/\">joblens</a></header>\n\
         <main>\n{body}</main>\n\
         <footer>{ad_slot}</footer>\n\
         </body>\n\
         </html>\n",
        title = esc(title),
        description = esc(description),
    )
}

fn search_form(criteria: &SearchCriteria) -> String {
    let keywords = criteria.keywords.as_deref().unwrap_or("");
    let location = criteria.location.as_deref().unwrap_or("");
    format!(
        "<form class=\"search\" action=\"/jobs\" method=\"get\">\n\
         <input type=\"text\" name=\"keywords\" placeholder=\"Job title or keywords\" value=\"{keywords}\">\n\
         <input type=\"text\" name=\"location\" placeholder=\"Location\" value=\"{location}\">\n\
         <select name=\"contract_type\">\n\
         <option value=\"\">Any contract</option>\n\
         <option value=\"permanent\">Permanent</option>\n\
         <option value=\"contract\">Contract</option>\n\
         <option value=\"temporary\">Temporary</option>\n\
         <option value=\"internship\">Internship</option>\n\
         </select>\n\
         <select name=\"work_hours\">\n\
         <option value=\"\">Any hours</option>\n\
         <option value=\"full\">Full-time</option>\n\
         <option value=\"part\">Part-time</option>\n\
         </select>\n\
         <button type=\"submit\">Search</button>\n\
         </form>\n",
        keywords = esc(keywords),
        location = esc(location),
    )
}

/// Home page: just the search form.
pub fn home_page(config: &AppConfig) -> String {
    let body = format!("<h1>Find your next job</h1>\n{}", search_form(&SearchCriteria::default()));
    layout(config, "joblens - job search", "Search thousands of job listings.", "", &body)
}

/// Listing page: results, a location-disambiguation prompt, or the
/// degraded empty state with the error message.
pub fn listing_page(config: &AppConfig, criteria: &SearchCriteria, response: &SearchResponse) -> String {
    let mut body = search_form(criteria);

    match response {
        SearchResponse::Jobs { jobs, hits, pages } => {
            if jobs.is_empty() {
                body.push_str("<p class=\"empty\">No jobs matched your search.</p>\n");
            } else {
                body.push_str(&format!("<p class=\"hits\">{hits} jobs found</p>\n<ul class=\"jobs\">\n"));
                for job in jobs {
                    body.push_str(&job_card(job));
                }
                body.push_str("</ul>\n");
                body.push_str(&pagination(criteria, *pages));
            }
        }
        SearchResponse::Locations { locations } => {
            body.push_str("<p class=\"disambiguation\">Did you mean one of these locations?</p>\n<ul class=\"locations\">\n");
            for location in locations {
                let href = format!(
                    "/jobs?keywords={}&location={}",
                    urlencode(criteria.keywords.as_deref().unwrap_or("")),
                    urlencode(location),
                );
                body.push_str(&format!("<li><a href=\"{}\">{}</a></li>\n", esc(&href), esc(location)));
            }
            body.push_str("</ul>\n");
        }
        SearchResponse::Failed { message } => {
            body.push_str(&format!(
                "<p class=\"error\">Search is temporarily unavailable: {}</p>\n",
                esc(message)
            ));
        }
    }

    let title = match &criteria.keywords {
        Some(keywords) => format!("{keywords} jobs - joblens"),
        None => "Job search - joblens".to_string(),
    };
    layout(config, &title, "Browse current job listings.", "", &body)
}

fn job_card(job: &Job) -> String {
    let salary = match (job.salary_min, job.salary_max, &job.salary_currency) {
        (Some(min), Some(max), Some(currency)) => {
            format!("<span class=\"salary\">{} {min:.0}-{max:.0}</span>", esc(currency))
        }
        _ => String::new(),
    };
    format!(
        "<li class=\"job\">\n\
         <a href=\"/jobs/{slug}\"><h2>{title}</h2></a>\n\
         <span class=\"company\">{company}</span>\n\
         <span class=\"location\">{location}</span>\n\
         <span class=\"date\">{date}</span>\n\
         {salary}\n\
         </li>\n",
        slug = esc(&job.slug),
        title = esc(&job.title),
        company = esc(&job.company),
        location = esc(&job.location),
        date = esc(&job.posted_at),
    )
}

fn pagination(criteria: &SearchCriteria, pages: u32) -> String {
    let page = criteria.get_page();
    let mut nav = String::from("<nav class=\"pages\">\n");
    if page > 1 {
        nav.push_str(&format!("<a href=\"{}\">Previous</a>\n", esc(&page_href(criteria, page - 1))));
    }
    if page < pages {
        nav.push_str(&format!("<a href=\"{}\">Next</a>\n", esc(&page_href(criteria, page + 1))));
    }
    nav.push_str("</nav>\n");
    nav
}

fn page_href(criteria: &SearchCriteria, page: u32) -> String {
    let mut href = format!("/jobs?page={page}");
    if let Some(keywords) = &criteria.keywords {
        href.push_str(&format!("&keywords={}", urlencode(keywords)));
    }
    if let Some(location) = &criteria.location {
        href.push_str(&format!("&location={}", urlencode(location)));
    }
    href
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Detail page with embedded JobPosting structured data.
pub fn detail_page(config: &AppConfig, job: &Job) -> String {
    let ld = seo::job_posting_ld(job, &config.site_origin);
    let head_extra = format!(
        "<script type=\"application/ld+json\">{}</script>\n",
        serde_json::to_string(&ld).unwrap_or_default()
    );

    let apply = match &job.apply_url {
        Some(url) => format!("<a class=\"apply\" href=\"{}\">Apply</a>\n", esc(url)),
        None => format!("<a class=\"apply\" href=\"{}\">View original posting</a>\n", esc(&job.url)),
    };

    // Upstream supplies the description as display HTML; rendered verbatim.
    let body = format!(
        "<article class=\"job\">\n\
         <h1>{title}</h1>\n\
         <p class=\"meta\">{company} - {location} - {date}</p>\n\
         <div class=\"description\">{description}</div>\n\
         {apply}\
         </article>\n",
        title = esc(&job.title),
        company = esc(&job.company),
        location = esc(&job.location),
        date = esc(&job.posted_at),
        description = job.description,
    );

    let description_meta = format!("{} at {} in {}", job.title, job.company, job.location);
    layout(config, &format!("{} - joblens", job.title), &description_meta, &head_extra, &body)
}

/// Not-found page for unresolvable slugs.
pub fn not_found_page(config: &AppConfig) -> String {
    let body = "<h1>Job not found</h1>\n\
                <p>This listing may have expired. Try a new search.</p>\n"
        .to_string()
        + &search_form(&SearchCriteria::default());
    layout(config, "Job not found - joblens", "This listing is no longer available.", "", &body)
}
