//! 계정 플로우 메일 본문

use crate::services::mail::OutgoingEmail;

pub fn activation_email(to: &str, site_name: &str, url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("Account activation on {}", site_name),
        body: format!(
            "You're receiving this email because you need to finish the activation process on {}.\n\n\
             Please go to the following page to activate your account:\n{}\n\n\
             Thanks for using our site!\n\nThe {} team",
            site_name, url, site_name
        ),
    }
}

pub fn confirmation_email(to: &str, site_name: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("{} - Your account has been successfully created and activated!", site_name),
        body: format!("Your account has been created and is ready to use!\n\nThe {} team", site_name),
    }
}

pub fn password_reset_email(to: &str, site_name: &str, url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("Password reset on {}", site_name),
        body: format!(
            "You're receiving this email because you requested a password reset for your user account at {}.\n\n\
             Please go to the following page and choose a new password:\n{}\n\n\
             Your username, in case you've forgotten: {}\n\nThe {} team",
            site_name, url, to, site_name
        ),
    }
}

pub fn password_changed_email(to: &str, site_name: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("{} - Your password has been successfully changed!", site_name),
        body: format!("Your password has been changed!\n\nThe {} team", site_name),
    }
}

pub fn email_reset_email(to: &str, site_name: &str, url: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: format!("Email reset on {}", site_name),
        body: format!(
            "You're receiving this email because you requested an email reset for your user account at {}.\n\n\
             Please go to the following page and choose a new email:\n{}\n\nThe {} team",
            site_name, url, site_name
        ),
    }
}
