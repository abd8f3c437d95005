use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use kernel::model::reservation::{PickupOption, Reservation};
use kernel::model::service::ServiceType;
use kernel::notifier::ReservationNotifier;
use reqwest::Client;
use shared::config::MailConfig;
use shared::error::{AppError, AppResult};

pub const SENDER_NAME: &str = "Sunny Paws Pet Care";

/// Sends mail through an HTTP mail API that accepts a base64-encoded
/// RFC 822 message as `{"raw": ...}` with bearer authentication.
pub struct MailNotifier {
    client: Client,
    cfg: MailConfig,
}

impl MailNotifier {
    pub fn new(cfg: MailConfig) -> Self {
        Self {
            client: Client::new(),
            cfg,
        }
    }

    async fn send(&self, to: &str, subject: &str, body_text: &str) -> AppResult<()> {
        let message_str = format!(
            "From: {} <{}>\r\nTo: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            SENDER_NAME, self.cfg.from_email, to, subject, body_text
        );
        let encoded_message = general_purpose::URL_SAFE_NO_PAD.encode(message_str.as_bytes());

        let res = self
            .client
            .post(&self.cfg.endpoint)
            .bearer_auth(&self.cfg.access_token)
            .json(&serde_json::json!({ "raw": encoded_message }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail api error: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "mail api returned {}",
                res.status()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl ReservationNotifier for MailNotifier {
    async fn send_confirmation(&self, reservation: &Reservation) -> AppResult<()> {
        let subject = format!("[{SENDER_NAME}] Your reservation is confirmed");
        let body_text = format!(
            "Dear {owner},\n\n\
             Thank you for your reservation. We have received the following booking.\n\n\
             -- Booking --\n\
             Service: {service}\n\
             Pet: {pet}\n\
             Date: {date}\n\
             {end_date}\
             Pick-up: {pickup}\n\n\
             -- Notes --\n\
             {notes}\n\n\
             We will contact you by phone or e-mail only if anything needs to be\n\
             confirmed; otherwise please come by on the day of your booking.\n\
             If anything is wrong, or you wish to cancel, please let us know as\n\
             soon as possible.",
            owner = reservation.owner_name,
            service = reservation.service_type.label(),
            pet = reservation.pet_name,
            date = reservation.date,
            end_date = stay_end_date_line(reservation),
            pickup = pickup_line(reservation),
            notes = reservation.notes.as_deref().unwrap_or("none"),
        );
        self.send(&reservation.email, &subject, &body_text).await
    }

    async fn send_operator_alert(&self, reservation: &Reservation) -> AppResult<()> {
        let subject = format!(
            "[New reservation] {} / {}",
            reservation.owner_name, reservation.pet_name
        );
        let body_text = format!(
            "A new reservation has come in.\n\n\
             -- Requester --\n\
             Name: {owner}\n\
             Phone: {phone}\n\
             E-mail: {email}\n\n\
             -- Pet --\n\
             Name: {pet}\n\n\
             -- Booking --\n\
             Service: {service}\n\
             Date: {date}\n\
             {end_date}\
             Pick-up: {pickup}\n\n\
             -- Notes --\n\
             {notes}\n\n\
             -- Detail --\n\
             {app_url}/admin/reservations/{id}",
            owner = reservation.owner_name,
            phone = reservation.phone,
            email = reservation.email,
            pet = reservation.pet_name,
            service = reservation.service_type.label(),
            date = reservation.date,
            end_date = stay_end_date_line(reservation),
            pickup = pickup_line(reservation),
            notes = reservation.notes.as_deref().unwrap_or("none"),
            app_url = self.cfg.app_url,
            id = reservation.reservation_id,
        );
        self.send(&self.cfg.operator_email, &subject, &body_text)
            .await
    }
}

fn stay_end_date_line(reservation: &Reservation) -> String {
    match (&reservation.end_time, reservation.service_type) {
        (Some(end), ServiceType::Stay) => format!("Check-out: {}\n", end.date()),
        _ => String::new(),
    }
}

fn pickup_line(reservation: &Reservation) -> String {
    let time = reservation.pickup_time.as_deref().unwrap_or("unspecified");
    match reservation.pickup_option {
        PickupOption::Yes => format!("yes (around {time})"),
        PickupOption::No => format!("no (arriving around {time})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kernel::model::id::{OwnerId, ReservationId, ServiceId};
    use kernel::model::reservation::ReservationStatus;

    fn reservation() -> Reservation {
        Reservation {
            reservation_id: ReservationId::new(),
            service_type: ServiceType::Stay,
            service_id: ServiceId::new(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            start_time: None,
            end_time: NaiveDate::from_ymd_opt(2026, 2, 3)
                .unwrap()
                .and_hms_opt(0, 0, 0),
            pet_id: None,
            owner_id: OwnerId::new(),
            staff_id: None,
            owner_name: "Taro Test".into(),
            phone: "090-0000-0000".into(),
            email: "test@example.com".into(),
            pet_name: "Tama".into(),
            pickup_option: PickupOption::Yes,
            pickup_time: Some("10:00".into()),
            grooming_options: None,
            notes: None,
            status: ReservationStatus::Confirmed,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn stay_bookings_carry_a_check_out_line() {
        assert_eq!(stay_end_date_line(&reservation()), "Check-out: 2026-02-03\n");

        let mut daycare = reservation();
        daycare.service_type = ServiceType::Daycare;
        assert_eq!(stay_end_date_line(&daycare), "");
    }

    #[test]
    fn pickup_line_distinguishes_pickup_from_walk_in() {
        assert_eq!(pickup_line(&reservation()), "yes (around 10:00)");

        let mut walk_in = reservation();
        walk_in.pickup_option = PickupOption::No;
        walk_in.pickup_time = Some("09:30".into());
        assert_eq!(pickup_line(&walk_in), "no (arriving around 09:30)");
    }
}
