//! Code Insights delivery client.
//!
//! Publishes a converted report to a Bitbucket-style reports API: the prior
//! report under the same scan id is deleted, the report resource is created,
//! and annotations are submitted in chunks of at most 100 (the API's
//! per-request limit). No retries; a failed request fails the publish.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info};

use crate::report::annotation::{Annotation, InsightReport};

const ANNOTATION_CHUNK: usize = 100;

pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Where a report gets published. All coordinates are opaque strings.
#[derive(Debug, Clone)]
pub struct DeliveryTarget {
    pub base_url: String,
    pub workspace: String,
    pub repository: String,
    pub commit: String,
}

pub struct DeliveryClient {
    http: Client,
    target: DeliveryTarget,
    token: String,
}

impl DeliveryClient {
    pub fn new(target: DeliveryTarget, token: String) -> Self {
        DeliveryClient {
            http: Client::new(),
            target,
            token,
        }
    }

    fn report_url(&self, scan_id: &str) -> String {
        let t = &self.target;
        format!(
            "{}/repositories/{}/{}/commit/{}/reports/{}",
            t.base_url, t.workspace, t.repository, t.commit, scan_id
        )
    }

    /// Publish a report: delete the old one, create the new one, upload
    /// annotations.
    pub fn publish(&self, report: &InsightReport) -> Result<()> {
        let url = self.report_url(&report.scan_id);

        self.delete_existing(&url)?;
        self.put_report(&url, report)?;
        self.post_annotations(&url, &report.annotations)?;

        info!(
            "Published report '{}' with {} annotations",
            report.scan_id,
            report.annotations.len()
        );
        Ok(())
    }

    fn delete_existing(&self, url: &str) -> Result<()> {
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .context("failed to delete existing report")?;
        // 404 just means there was no prior report
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            anyhow::bail!("deleting existing report failed: {}", response.status());
        }
        debug!("Cleared prior report at {url}");
        Ok(())
    }

    fn put_report(&self, url: &str, report: &InsightReport) -> Result<()> {
        let body = json!({
            "title": report.title,
            "details": report.summary,
            "report_type": "SECURITY",
            "reporter": format!("remora v{}", report.version),
            "result": report.verdict,
        });
        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .context("failed to create report")?;
        if !response.status().is_success() {
            anyhow::bail!("creating report failed: {}", response.status());
        }
        Ok(())
    }

    fn post_annotations(&self, url: &str, annotations: &[Annotation]) -> Result<()> {
        for chunk in annotations.chunks(ANNOTATION_CHUNK) {
            let body: Vec<_> = chunk
                .iter()
                .map(|a| {
                    json!({
                        "external_id": a.external_id,
                        "annotation_type": a.annotation_type,
                        "severity": a.severity,
                        "summary": a.summary,
                        "details": a.details,
                        "path": a.path,
                        "line": a.line,
                    })
                })
                .collect();
            let response = self
                .http
                .post(format!("{url}/annotations"))
                .bearer_auth(&self.token)
                .json(&body)
                .send()
                .context("failed to upload annotations")?;
            if !response.status().is_success() {
                anyhow::bail!("uploading annotations failed: {}", response.status());
            }
            debug!("Uploaded {} annotations", chunk.len());
        }
        Ok(())
    }
}
