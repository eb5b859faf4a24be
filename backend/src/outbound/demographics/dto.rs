//! DTOs for decoding demographic source responses.
//!
//! Each source reports "no estimate" as `null` or an empty list; absent keys
//! decode the same way.

use serde::Deserialize;

use crate::domain::ports::CountryProbability;

#[derive(Debug, Deserialize)]
pub(super) struct AgeResponseDto {
    #[serde(default)]
    pub(super) age: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenderResponseDto {
    #[serde(default)]
    pub(super) gender: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NationalityResponseDto {
    #[serde(default)]
    pub(super) country: Vec<CountryDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CountryDto {
    pub(super) country_id: String,
    pub(super) probability: f64,
}

impl AgeResponseDto {
    /// Estimated age; `0` means the source had no estimate.
    pub(super) fn into_age(self) -> Option<u32> {
        self.age.filter(|age| *age > 0)
    }
}

impl GenderResponseDto {
    pub(super) fn into_gender(self) -> Option<String> {
        self.gender.filter(|gender| !gender.trim().is_empty())
    }
}

impl NationalityResponseDto {
    pub(super) fn into_candidates(self) -> Vec<CountryProbability> {
        self.country
            .into_iter()
            .map(|entry| CountryProbability::new(entry.country_id, entry.probability))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"count":1,"name":"Oliver","age":32}"#, Some(32))]
    #[case(r#"{"count":0,"name":"Zyx","age":null}"#, None)]
    #[case(r#"{"name":"Zyx"}"#, None)]
    #[case(r#"{"count":0,"name":"Zyx","age":0}"#, None)]
    fn age_payloads(#[case] body: &str, #[case] expected: Option<u32>) {
        let dto: AgeResponseDto = serde_json::from_str(body).expect("decode age");
        assert_eq!(dto.into_age(), expected);
    }

    #[rstest]
    fn negative_age_is_rejected() {
        assert!(serde_json::from_str::<AgeResponseDto>(r#"{"age":-4}"#).is_err());
    }

    #[rstest]
    #[case(r#"{"gender":"male","probability":0.99}"#, Some("male"))]
    #[case(r#"{"gender":null}"#, None)]
    #[case(r#"{"gender":""}"#, None)]
    fn gender_payloads(#[case] body: &str, #[case] expected: Option<&str>) {
        let dto: GenderResponseDto = serde_json::from_str(body).expect("decode gender");
        assert_eq!(dto.into_gender().as_deref(), expected);
    }

    #[rstest]
    fn nationality_payload_keeps_source_order() {
        let dto: NationalityResponseDto = serde_json::from_str(
            r#"{"name":"Oliver","country":[{"country_id":"GB","probability":0.9},{"country_id":"IE","probability":0.05}]}"#,
        )
        .expect("decode nationality");
        let candidates = dto.into_candidates();
        assert_eq!(
            candidates,
            vec![
                CountryProbability::new("GB", 0.9),
                CountryProbability::new("IE", 0.05)
            ]
        );
    }
}
