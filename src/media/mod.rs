pub mod fingerprint;
pub mod short_name;
