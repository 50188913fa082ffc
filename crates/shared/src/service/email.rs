use crate::{
    abstract_trait::{DynEmailService, EmailServiceTrait},
    config::EmailConfig,
    domain::requests::EmailRequest,
    errors::ServiceError,
    utils::{EmailTemplateData, render_email},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    message::{Mailbox, Message},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info};

type SmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let creds = Credentials::new(config.smtp_user.clone(), config.smtp_pass.clone());

        let mailer = SmtpTransport::starttls_relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        let from: Mailbox = config
            .from_address
            .parse()
            .context("Invalid sender email format")?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailServiceTrait for EmailService {
    async fn send(&self, req: &EmailRequest) -> Result<(), ServiceError> {
        let body = render_email(&req.data).map_err(|e| {
            error!("❌ Failed to render email template: {}", e);
            ServiceError::Mail(format!("Failed to render email template: {e}"))
        })?;

        let to: Mailbox = req.to.parse().map_err(|e| {
            error!("❌ Invalid recipient email: {}", e);
            ServiceError::Mail(format!("Invalid recipient email: {e}"))
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&req.subject)
            .header(lettre::message::header::ContentType::TEXT_HTML)
            .body(body)
            .map_err(|e| {
                error!("❌ Failed to build email: {}", e);
                ServiceError::Mail(format!("Failed to build email: {e}"))
            })?;

        match self.mailer.send(email).await {
            Ok(_) => {
                info!("✅ Email sent to {}", req.to);
                Ok(())
            }
            Err(e) => {
                error!("❌ Failed to send email to {}: {}", req.to, e);
                Err(ServiceError::Mail(format!("Failed to send email: {e}")))
            }
        }
    }
}

/// Detached dispatch on top of the mailer: sends are spawned onto the runtime
/// and never block or fail the request that triggered them. Failures only show
/// up in the logs.
#[derive(Clone)]
pub struct Notifier {
    email: DynEmailService,
    base_url: String,
}

impl Notifier {
    pub fn new(email: DynEmailService, base_url: String) -> Self {
        Self { email, base_url }
    }

    pub fn send_welcome(&self, to: &str, name: &str) {
        self.dispatch(EmailRequest {
            to: to.to_string(),
            subject: "Welcome to the store!".to_string(),
            data: EmailTemplateData {
                title: format!("Welcome, {name}!"),
                message: "Thank you for registering. Happy shopping!".to_string(),
                button: "Start Shopping".to_string(),
                link: self.base_url.clone(),
            },
        });
    }

    pub fn send_login_notice(&self, to: &str, name: &str) {
        self.dispatch(EmailRequest {
            to: to.to_string(),
            subject: "Login confirmation".to_string(),
            data: EmailTemplateData {
                title: format!("Hello, {name}"),
                message: "A new login to your account was just recorded.".to_string(),
                button: "Go to the store".to_string(),
                link: self.base_url.clone(),
            },
        });
    }

    fn dispatch(&self, req: EmailRequest) {
        let email = self.email.clone();

        tokio::spawn(async move {
            if let Err(e) = email.send(&req).await {
                error!("❌ Notification email to {} failed: {e}", req.to);
            }
        });
    }
}
