use crate::error::ReservationNotifierError;
use std::env;
use std::str::FromStr;

pub struct Environment;

impl Environment {
    pub fn string(
        env_name: &str,
        default: &str,
    ) -> String {
        env::var(env_name).ok().unwrap_or(default.to_string())
    }

    pub fn u64(
        env_name: &str,
        default: u64,
    ) -> Result<u64, ReservationNotifierError> {
        Self::parse(env_name, default)
    }

    pub fn usize(
        env_name: &str,
        default: usize,
    ) -> Result<usize, ReservationNotifierError> {
        Self::parse(env_name, default)
    }

    pub fn boolean(
        env_name: &str,
        default: bool,
    ) -> bool {
        env::var(env_name).ok().map(|value| value.trim().eq_ignore_ascii_case("true")).unwrap_or(default)
    }

    fn parse<T: FromStr>(
        env_name: &str,
        default: T,
    ) -> Result<T, ReservationNotifierError> {
        match env::var(env_name) {
            Ok(value) => value
                .trim()
                .parse::<T>()
                .map_err(|_| ReservationNotifierError::configuration(&format!("{env_name} has invalid value '{value}'"))),
            Err(_) => Ok(default),
        }
    }
}
