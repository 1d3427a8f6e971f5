use crate::Result;
use async_trait::async_trait;
use farewatch_core::config::SmtpConfig;
use farewatch_core::monitor::AlertSink;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Sends price change alerts over authenticated STARTTLS SMTP. A delivery
/// failure is reported to the caller and never touches monitor state.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
            to: config.to.parse()?,
        })
    }

    /// Mail the baseline and current prices with their delta.
    pub async fn send_price_alert(&self, baseline: f64, current: f64) -> Result<()> {
        let change_percent = (current - baseline) / baseline * 100.0;

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format_subject(change_percent))
            .body(format_body(baseline, current))?;

        tracing::info!("Sending price alert ({:+.2}%)", change_percent);
        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl AlertSink for EmailNotifier {
    type Error = crate::Error;

    async fn send_price_alert(&self, baseline: f64, current: f64) -> Result<()> {
        EmailNotifier::send_price_alert(self, baseline, current).await
    }
}

fn format_subject(change_percent: f64) -> String {
    format!("Ticket price changed by {:+.2}%", change_percent)
}

fn format_body(baseline: f64, current: f64) -> String {
    let difference = current - baseline;
    let change_percent = difference / baseline * 100.0;
    format!(
        "Baseline price: {:.2}\nCurrent price: {:.2}\nChange: {:+.2} ({:+.2}%)\n",
        baseline, current, difference, change_percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "alerts".to_string(),
            password: "secret".to_string(),
            from: "Farewatch <alerts@example.com>".to_string(),
            to: "me@example.com".to_string(),
        }
    }

    #[test]
    fn test_notifier_builds_from_config() {
        assert!(EmailNotifier::new(&config()).is_ok());
    }

    #[test]
    fn test_notifier_rejects_bad_address() {
        let mut bad = config();
        bad.to = "not an address".to_string();
        assert!(matches!(
            EmailNotifier::new(&bad),
            Err(crate::Error::Address(_))
        ));
    }

    #[test]
    fn test_subject_carries_signed_percentage() {
        assert_eq!(format_subject(20.0), "Ticket price changed by +20.00%");
        assert_eq!(format_subject(-7.5), "Ticket price changed by -7.50%");
    }

    #[test]
    fn test_body_lists_both_prices_and_delta() {
        let body = format_body(25000.0, 30000.0);
        assert!(body.contains("Baseline price: 25000.00"));
        assert!(body.contains("Current price: 30000.00"));
        assert!(body.contains("Change: +5000.00 (+20.00%)"));
    }
}
