use anyhow::{bail, Result};

use crate::domain::{extract_reply, JobId, JobStatus, StatusReport};

use super::super::Container;

pub struct StatusController<'a> {
    container: &'a Container,
}

impl<'a> StatusController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn status(&self, job_id: String) -> Result<String> {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            bail!("Job id must not be empty");
        }

        let job_id = JobId::new(job_id);
        let report = self.container.orchestrator().poll_once(&job_id).await?;
        Ok(self.format_report(&job_id, &report))
    }

    fn format_report(&self, job_id: &JobId, report: &StatusReport) -> String {
        let mut output = format!(
            "Job:      {}\nEndpoint: {}\nStatus:   {}",
            job_id,
            self.container.endpoint_label(),
            report.status()
        );

        if report.status() == &JobStatus::Completed {
            match report.output() {
                Some(entries) => {
                    output.push_str(&format!("\nReply:    {}", extract_reply(entries)))
                }
                None => output.push_str("\nReply:    (no output)"),
            }
        }
        output
    }
}
