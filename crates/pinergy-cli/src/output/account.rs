use pinergy_core::{LandlordCheckResponse, LoginResponse, NotificationPreferences};

use super::{table, titled, Report};

const TOKEN_PREVIEW: usize = 20;

impl Report for LoginResponse {
    fn render(&self) -> String {
        let preview: String = self.auth_token.chars().take(TOKEN_PREVIEW).collect();
        let mut text = format!("Login successful.\nAuth token: {preview}...");
        if !self.premises_number.is_empty() {
            text.push_str(&format!("\nPremises: {}", self.premises_number));
        }
        text.push_str("\nSet PINERGY_AUTH_TOKEN to the full token for other commands (see --output json).");
        text
    }
}

impl Report for NotificationPreferences {
    fn render(&self) -> String {
        let mut t = table(&["Field", "Value"]);
        let _ = t.add_row(vec!["email notifications".to_string(), self.email.to_string()]);
        let _ = t.add_row(vec!["phone notifications".to_string(), self.phone.to_string()]);
        let _ = t.add_row(vec!["sms notifications".to_string(), self.sms.to_string()]);
        let _ = t.add_row(vec!["should_show".to_string(), self.should_show.to_string()]);
        if !self.should_show_message.is_empty() {
            let _ = t.add_row(vec![
                "should_show_message".to_string(),
                self.should_show_message.clone(),
            ]);
        }
        titled("Account (notification preferences)", &t)
    }
}

impl Report for LandlordCheckResponse {
    fn render(&self) -> String {
        if self.is_landlord_account {
            "This is a landlord account.".to_string()
        } else {
            "Not a landlord account.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinergy_core::decode;
    use serde_json::json;

    #[test]
    fn login_shows_only_a_token_preview() {
        let login: LoginResponse = decode(&json!({
            "success": true,
            "auth_token": "0123456789abcdefghijKLMNOPQRSTUVWXYZ",
            "premises_number": "P-7"
        }));
        let text = login.render();
        assert!(text.contains("0123456789abcdefghij..."));
        assert!(!text.contains("KLMNOP"));
        assert!(text.contains("Premises: P-7"));
    }

    #[test]
    fn preferences_hide_empty_message() {
        let prefs: NotificationPreferences = decode(&json!({"email": true, "sms": 1}));
        let text = prefs.render();
        assert!(text.contains("email notifications"));
        assert!(text.contains("true"));
        assert!(!text.contains("should_show_message"));
    }

    #[test]
    fn landlord_verdict() {
        let yes: LandlordCheckResponse = decode(&json!({"is_landlord_account": true}));
        let no: LandlordCheckResponse = decode(&json!({}));
        assert_eq!(yes.render(), "This is a landlord account.");
        assert_eq!(no.render(), "Not a landlord account.");
    }
}
