// src/pipeline/http_renderer.rs
//
// Renderer backed by plain HTTP. It sees the server-rendered HTML only, so
// scripts are not run and element waits check the fetched document once.

use crate::errors::RendererError;
use crate::pipeline::renderer::{DocumentSnapshot, Renderer};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER};
use scraper::{Html, Selector};
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

pub struct HttpRenderer {
    client: Option<Client>,
    current: Option<DocumentSnapshot>,
}

impl HttpRenderer {
    pub fn new(request_timeout: Duration) -> Result<Self, RendererError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-CA,en;q=0.9"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(request_timeout)
            .build()
            .map_err(|e| RendererError::Launch(e.to_string()))?;

        Ok(Self {
            client: Some(client),
            current: None,
        })
    }

    fn client(&self) -> Result<&Client, RendererError> {
        self.client.as_ref().ok_or(RendererError::Closed)
    }

    fn current(&self) -> Result<&DocumentSnapshot, RendererError> {
        self.current
            .as_ref()
            .ok_or_else(|| RendererError::Navigation("no page loaded".into()))
    }
}

impl Renderer for HttpRenderer {
    fn render(&mut self, url: &str) -> Result<DocumentSnapshot, RendererError> {
        let resp = self
            .client()?
            .get(url)
            .send()
            .map_err(|e| RendererError::Navigation(e.to_string()))?;

        let status = resp.status();
        let html = resp
            .text()
            .map_err(|e| RendererError::Navigation(e.to_string()))?;

        if !status.is_success() {
            return Err(RendererError::Navigation(format!("HTTP {status} for {url}")));
        }

        let snapshot = DocumentSnapshot {
            url: url.to_string(),
            html,
        };
        self.current = Some(snapshot.clone());
        Ok(snapshot)
    }

    fn wait_for_element(&mut self, css: &str, _timeout: Duration) -> Result<bool, RendererError> {
        let selector = Selector::parse(css).map_err(|e| RendererError::Script(e.to_string()))?;
        let document = Html::parse_document(&self.current()?.html);
        let found = document.select(&selector).next().is_some();
        Ok(found)
    }

    fn execute_script(&mut self, _script: &str) -> Result<(), RendererError> {
        self.client()?;
        Ok(())
    }

    fn snapshot(&mut self) -> Result<DocumentSnapshot, RendererError> {
        self.current().cloned()
    }

    fn close(&mut self) -> Result<(), RendererError> {
        self.client = None;
        self.current = None;
        Ok(())
    }
}
