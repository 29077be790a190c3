use chrono::{Duration, Utc};
use clap::Args;
use internboard::config::AppConfig;
use internboard::error::AppError;
use internboard::identity::{Identity, JwtAuthority, Role, UserId};

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Subject of the token, as the identity provider would issue it
    #[arg(long)]
    pub(crate) user_id: String,
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) email: String,
    /// Grant the admin role instead of applicant
    #[arg(long)]
    pub(crate) admin: bool,
}

impl TokenArgs {
    fn identity(&self) -> Identity {
        Identity {
            user_id: UserId(self.user_id.clone()),
            role: if self.admin {
                Role::Admin
            } else {
                Role::Applicant
            },
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Print a bearer token on stdout and its expiry on stderr, so the token can
/// be captured with shell substitution.
pub(crate) fn run_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let authority = JwtAuthority::from_config(&config.auth)?;
    let identity = args.identity();

    let token = authority.issue(&identity)?;
    let expires_at = Utc::now() + Duration::hours(config.auth.token_ttl_hours);

    println!("{token}");
    eprintln!(
        "{} token for {} expires {}",
        identity.role.label(),
        identity.user_id.as_str(),
        expires_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_identity_round_trips_through_the_authority() {
        let args = TokenArgs {
            user_id: "student-7".to_string(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            admin: false,
        };
        let authority = JwtAuthority::new("cli-secret", Duration::hours(2));

        let token = authority.issue(&args.identity()).expect("signs");
        let identity = authority.verify(&token).expect("verifies");

        assert_eq!(identity.user_id.as_str(), "student-7");
        assert_eq!(identity.role, Role::Applicant);
        assert!(!identity.is_admin());
    }
}
