use serde::Deserialize;

use crate::error::BuildError;

/// One dialing-code entry from the country lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub name: String,
    pub iso: String,
    pub code: String,
}

/// Read-only lookup of international dialing codes.
///
/// Constructed once and passed to whoever needs it (for example
/// [`Validator::phone`](crate::Validator::phone)); there is deliberately no
/// process-wide instance.
#[derive(Debug, Clone)]
pub struct CountryCodes {
    countries: Vec<Country>,
}

const BUILTIN: &str = include_str!("../resources/country_codes.json");

impl CountryCodes {
    /// Lookup backed by the embedded country-code table.
    pub fn builtin() -> Result<Self, BuildError> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let countries: Vec<Country> =
            serde_json::from_str(json).map_err(|error| BuildError::CountryCodes(error.to_string()))?;
        Ok(Self { countries })
    }

    pub fn all(&self) -> &[Country] {
        &self.countries
    }

    pub fn find_by_iso(&self, iso: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|country| country.iso.eq_ignore_ascii_case(iso))
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|country| country.code == code)
    }

    /// Resolve the country for a full phone number by its dialing-code
    /// prefix, longest code first.
    pub fn lookup(&self, phone: &str) -> Option<&Country> {
        let digits = phone.strip_prefix('+').unwrap_or(phone);
        let mut codes: Vec<&Country> = self.countries.iter().collect();
        codes.sort_by_key(|country| std::cmp::Reverse(country.code.len()));
        codes
            .into_iter()
            .find(|country| digits.starts_with(&country.code))
    }

    /// Check a phone number against [`phone_pattern`](Self::phone_pattern)
    /// without going through a validator.
    pub fn validate_phone(
        &self,
        phone: &str,
        require_plus: bool,
        check_code: bool,
    ) -> Result<bool, BuildError> {
        let pattern = self.phone_pattern(require_plus, check_code);
        let regex = regex::Regex::new(&pattern).map_err(|error| BuildError::Pattern {
            pattern,
            reason: error.to_string(),
        })?;
        Ok(regex.is_match(phone))
    }

    /// Anchored pattern matching a phone number: an optional (or required)
    /// leading `+`, a dialing code, then 4 to 15 national digits. With
    /// `check_code` the dialing code must be one of the known codes.
    pub(crate) fn phone_pattern(&self, require_plus: bool, check_code: bool) -> String {
        let prefix = if require_plus { r"^\+" } else { r"^\+?" };
        let code = if check_code {
            let mut codes: Vec<&str> = self
                .countries
                .iter()
                .map(|country| country.code.as_str())
                .collect();
            codes.sort_by_key(|code| std::cmp::Reverse(code.len()));
            let escaped: Vec<String> = codes.iter().map(|code| regex::escape(code)).collect();
            format!("({})", escaped.join("|"))
        } else {
            r"(\d{1,4})".to_string()
        };
        format!(r"{prefix}{code}\d{{4,15}}$")
    }
}
