//! Client profile completion rules.

use std::fmt;

/// Services a client can hire for.
pub const SERVICE_CATALOG: &[&str] = &[
    "Assignment Writing",
    "Content Writing",
    "Graphic Design",
    "Data Entry",
    "Video Editing",
    "Logo Design",
];

/// A client profile as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub full_name: String,
    pub phone_number: String,
    pub services: Vec<String>,
    pub city_area: String,
}

/// Why a profile form was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    MissingFullName,
    MissingPhoneNumber,
    NoServices,
    UnknownService(String),
    MissingCityArea,
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::MissingFullName => write!(f, "Please enter your full name"),
            ProfileError::MissingPhoneNumber => write!(f, "Please enter your phone number"),
            ProfileError::NoServices => write!(f, "Please select at least one service"),
            ProfileError::UnknownService(service) => write!(f, "Unknown service: {service}"),
            ProfileError::MissingCityArea => write!(f, "Please enter your city or area"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl ProfileForm {
    /// Validates the form, first violation wins.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.full_name.trim().is_empty() {
            return Err(ProfileError::MissingFullName);
        }
        if self.phone_number.trim().is_empty() {
            return Err(ProfileError::MissingPhoneNumber);
        }
        if self.services.is_empty() {
            return Err(ProfileError::NoServices);
        }
        for service in &self.services {
            if !SERVICE_CATALOG
                .iter()
                .any(|known| known.eq_ignore_ascii_case(service))
            {
                return Err(ProfileError::UnknownService(service.clone()));
            }
        }
        if self.city_area.trim().is_empty() {
            return Err(ProfileError::MissingCityArea);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ProfileForm {
        ProfileForm {
            full_name: "Ada Lovelace".to_string(),
            phone_number: "+44 20 7946 0000".to_string(),
            services: vec!["Data Entry".to_string()],
            city_area: "London".to_string(),
        }
    }

    /// Test: a complete form validates.
    #[test]
    fn test_complete_form() {
        assert_eq!(complete_form().validate(), Ok(()));
    }

    /// Test: violations are reported in field order, whitespace-only counts
    /// as missing.
    #[test]
    fn test_first_violation_wins() {
        let mut form = complete_form();
        form.full_name = "   ".to_string();
        form.city_area = String::new();
        assert_eq!(form.validate(), Err(ProfileError::MissingFullName));

        let mut form = complete_form();
        form.services.clear();
        assert_eq!(form.validate(), Err(ProfileError::NoServices));
    }

    /// Test: services must come from the catalog, case-insensitively.
    #[test]
    fn test_service_catalog_membership() {
        let mut form = complete_form();
        form.services = vec!["logo design".to_string()];
        assert_eq!(form.validate(), Ok(()));

        form.services = vec!["Underwater Welding".to_string()];
        assert_eq!(
            form.validate(),
            Err(ProfileError::UnknownService("Underwater Welding".to_string()))
        );
    }
}
