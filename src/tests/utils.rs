// src/tests/utils.rs

use crate::diagnostics::{DiagnosticEvent, Diagnostics};
use crate::errors::RendererError;
use crate::mailer::{MailerError, NotificationSink};
use crate::pipeline::{DocumentSnapshot, Renderer, Sleeper};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Keeps every event so tests can assert on them.
#[derive(Default)]
pub struct MemoryDiagnostics {
    pub events: RefCell<Vec<DiagnosticEvent>>,
}

impl Diagnostics for MemoryDiagnostics {
    fn event(&self, event: DiagnosticEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl MemoryDiagnostics {
    pub fn count(&self, pred: impl Fn(&DiagnosticEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

#[derive(Debug, Clone)]
pub enum FakePage {
    Html(String),
    /// Loads, but the listing container never appears.
    Timeout,
    /// Navigation itself fails.
    Broken,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub visited: Vec<String>,
    pub scripts: Vec<String>,
    pub close_calls: usize,
}

/// Serves canned pages by URL. Unknown URLs behave as `Broken`.
pub struct FakeRenderer {
    pages: HashMap<String, FakePage>,
    current: Option<(String, FakePage)>,
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeRenderer {
    pub fn new(pages: Vec<(String, FakePage)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            current: None,
            state: Rc::new(RefCell::new(FakeState::default())),
        }
    }

    fn closed(&self) -> bool {
        self.state.borrow().close_calls > 0
    }
}

impl Renderer for FakeRenderer {
    fn render(&mut self, url: &str) -> Result<DocumentSnapshot, RendererError> {
        if self.closed() {
            return Err(RendererError::Closed);
        }
        self.state.borrow_mut().visited.push(url.to_string());

        let page = self.pages.get(url).cloned().unwrap_or(FakePage::Broken);
        let html = match &page {
            FakePage::Html(html) => html.clone(),
            FakePage::Timeout => "<html><body>Loading...</body></html>".to_string(),
            FakePage::Broken => {
                return Err(RendererError::Navigation(format!("connection reset: {url}")))
            }
        };
        self.current = Some((url.to_string(), page));
        Ok(DocumentSnapshot {
            url: url.to_string(),
            html,
        })
    }

    fn wait_for_element(&mut self, _css: &str, _timeout: Duration) -> Result<bool, RendererError> {
        match &self.current {
            Some((_, FakePage::Timeout)) => Ok(false),
            Some(_) => Ok(true),
            None => Err(RendererError::Navigation("no page loaded".into())),
        }
    }

    fn execute_script(&mut self, script: &str) -> Result<(), RendererError> {
        self.state.borrow_mut().scripts.push(script.to_string());
        Ok(())
    }

    fn snapshot(&mut self) -> Result<DocumentSnapshot, RendererError> {
        match &self.current {
            Some((url, FakePage::Html(html))) => Ok(DocumentSnapshot {
                url: url.clone(),
                html: html.clone(),
            }),
            _ => Err(RendererError::Navigation("nothing to snapshot".into())),
        }
    }

    fn close(&mut self) -> Result<(), RendererError> {
        self.state.borrow_mut().close_calls += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper {
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<SentMail>>,
    pub fail: bool,
}

impl NotificationSink for RecordingNotifier {
    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::ApiError("401 unauthorized".into()));
        }
        self.sent.borrow_mut().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Unique path in the system temp dir.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}.{ext}",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// Markup of one listing the way the results page renders it. Pass `None`
/// to leave a field out.
pub struct ListingHtml<'a> {
    pub key: &'a str,
    pub title: Option<&'a str>,
    pub price: Option<&'a str>,
    pub delta: Option<&'a str>,
    pub href: Option<&'a str>,
}

impl<'a> ListingHtml<'a> {
    pub fn full(key: &'a str, title: &'a str, delta: Option<&'a str>) -> Self {
        Self {
            key,
            title: Some(title),
            price: Some("$24,995"),
            delta,
            href: Some("/a/toyota/rav4/toronto/ontario/5_12345_abc/?showcpo=1&ncse=no"),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(r#"<div class="result-item-inner organic">"#);
        if let Some(href) = self.href {
            out.push_str(&format!(r#"<a class="inner-link" href="{href}">"#));
        }
        out.push_str(r#"<img class="photo-image" src="https://photos.example/1.jpg">"#);
        if let Some(title) = self.title {
            out.push_str(&format!(
                r#"<h2><span class="result-title click">
                    {title}
                </span></h2>"#
            ));
        }
        if self.href.is_some() {
            out.push_str("</a>");
        }
        if let Some(price) = self.price {
            out.push_str(&format!(r#"<span class="price-amount">{price}</span>"#));
        }
        if let Some(delta) = self.delta {
            out.push_str(&format!(
                r#"<p id="{}_DeltaPrice" class="price-delta">{delta}</p>"#,
                self.key
            ));
        }
        out.push_str(r#"<span class="proximity-text">Toronto, ON</span>"#);
        out.push_str(r#"<span class="odometer-proximity">45,120 km</span>"#);
        out.push_str(r#"<div class="seller-name"> Downtown Toyota </div>"#);
        out.push_str(r#"<p class="details used">AWD, heated seats</p>"#);
        out.push_str("</div>");
        out
    }
}

pub fn results_page(listings: &[ListingHtml<'_>]) -> String {
    let body: String = listings.iter().map(ListingHtml::render).collect();
    format!(
        r#"<!DOCTYPE html><html><head><title>Results</title></head>
        <body><div id="SearchListings">{body}</div></body></html>"#
    )
}
