//! Email notification for new job matches.
//!
//! Renders an HTML digest and delivers it over SMTP with STARTTLS.
//! Delivery is best effort: errors are typed so the orchestrator can log
//! them, but a failed send never aborts the cycle.

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::Settings;
use crate::types::JobPosting;

const SUBJECT_PREFIX: &str = "NJ State Jobs";

/// Why a notification was not (or could not be) delivered.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("missing SMTP configuration: {0}")]
    Config(String),

    #[error("invalid address {0:?}: {1}")]
    Address(String, String),

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("SMTP delivery failed: {0}")]
    Smtp(String),
}

/// Sends the per-cycle digest email for new jobs.
pub struct EmailNotifier {
    settings: Settings,
}

impl EmailNotifier {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// Send an HTML digest of `jobs` to all configured recipients in one
    /// SMTP transaction. Incomplete configuration returns an error before
    /// any connection attempt; an empty job list is a logged no-op.
    pub fn send(&self, jobs: &[JobPosting]) -> Result<(), NotifyError> {
        if jobs.is_empty() {
            info!("no new jobs to notify about");
            return Ok(());
        }

        let smtp = &self.settings.smtp;
        if smtp.user.is_empty()
            || smtp.password.is_empty()
            || smtp.server.is_empty()
            || self.settings.recipients.is_empty()
        {
            return Err(NotifyError::Config(
                "sender, password, server and at least one recipient are required".to_string(),
            ));
        }

        let from = parse_mailbox(&smtp.user)?;
        let subject = format!(
            "{SUBJECT_PREFIX}: {} New Matching Positions Found",
            jobs.len()
        );

        let mut builder = Message::builder().from(from).subject(subject);
        for recipient in &self.settings.recipients {
            builder = builder.to(parse_mailbox(recipient)?);
        }

        let body = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(build_html_body(jobs));
        let email = builder
            .multipart(MultiPart::mixed().singlepart(body))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        info!(server = %smtp.server, port = smtp.port, "connecting to SMTP server");

        let transport = SmtpTransport::starttls_relay(&smtp.server)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?
            .port(smtp.port)
            .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
            .build();

        transport
            .send(&email)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?;

        info!(
            recipients = self.settings.recipients.len(),
            jobs = jobs.len(),
            "notification sent"
        );
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| {
            NotifyError::Address(address.to_string(), e.to_string())
        })
}

/// Render the digest: one table row per job, link as an anchor.
fn build_html_body(jobs: &[JobPosting]) -> String {
    let style = "text-align: left; padding: 8px; border: 1px solid #ddd;";

    let mut rows = String::new();
    for job in jobs {
        rows.push_str(&format!(
            "<tr>\
             <td style=\"{style}\">{}</td>\
             <td style=\"{style}\">{}</td>\
             <td style=\"{style}\">{}</td>\
             <td style=\"{style}\">{}</td>\
             <td style=\"{style}\"><a href=\"{}\">Link</a></td>\
             </tr>\n",
            job.symbol, job.title, job.jurisdiction, job.closing_date, job.link
        ));
    }

    format!(
        "<html>\n\
         <body>\n\
         <h2>New Matching Jobs Found</h2>\n\
         <table style=\"border-collapse: collapse; width: 100%;\">\n\
         <thead>\n\
         <tr style=\"background-color: #f2f2f2;\">\n\
         <th style=\"{style}\">Symbol</th>\n\
         <th style=\"{style}\">Title</th>\n\
         <th style=\"{style}\">Location</th>\n\
         <th style=\"{style}\">Closing</th>\n\
         <th style=\"{style}\">Link</th>\n\
         </tr>\n\
         </thead>\n\
         <tbody>\n{rows}</tbody>\n\
         </table>\n\
         </body>\n\
         </html>"
    )
}
