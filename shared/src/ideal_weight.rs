//! Breed/sex healthy weight ranges and weight status classification

use crate::models::{Breed, IdealWeightEstimate, Sex, WeightRange, WeightStatus, ADULT_FROM_MONTHS};

/// Range used for breeds without a dedicated entry
pub const DEFAULT_RANGE_MALE: WeightRange = WeightRange::new(4.0, 6.0);
pub const DEFAULT_RANGE_FEMALE: WeightRange = WeightRange::new(3.0, 5.0);

/// Healthy adult weight range for a breed and sex
pub fn breed_weight_range(breed: Breed, sex: Sex) -> WeightRange {
    let (male, female) = match breed {
        Breed::MaineCoon => ((6.5, 11.0), (4.5, 7.0)),
        Breed::Ragdoll => ((5.5, 9.0), (4.5, 6.5)),
        Breed::NorwegianForest => ((5.5, 9.0), (3.5, 6.0)),
        Breed::BritishShorthair => ((5.0, 8.0), (3.5, 6.0)),
        Breed::ScottishFold => ((4.0, 6.0), (2.7, 4.5)),
        Breed::Persian | Breed::ExoticShorthair => ((4.0, 6.5), (3.0, 5.0)),
        Breed::Siamese => ((4.0, 6.0), (2.5, 4.0)),
        Breed::Bengal => ((4.5, 7.0), (3.5, 5.5)),
        Breed::Abyssinian => ((3.5, 5.0), (2.5, 4.0)),
        Breed::Sphynx | Breed::Peterbald => ((3.5, 5.5), (2.5, 4.0)),
        Breed::DevonRex => ((3.0, 4.5), (2.0, 3.5)),
        Breed::Singapura => ((2.5, 3.5), (1.8, 2.7)),
        Breed::DomesticShorthair | Breed::Mixed | Breed::Other => {
            return match sex {
                Sex::Male => DEFAULT_RANGE_MALE,
                Sex::Female => DEFAULT_RANGE_FEMALE,
            };
        }
    };
    let (min, max) = match sex {
        Sex::Male => male,
        Sex::Female => female,
    };
    WeightRange::new(min, max)
}

/// Estimate the ideal weight; no estimate exists while the cat is still growing
pub fn estimate_ideal_weight(
    breed: Breed,
    sex: Sex,
    age_months: f64,
    current_weight_kg: f64,
) -> IdealWeightEstimate {
    if age_months < ADULT_FROM_MONTHS {
        return IdealWeightEstimate {
            ideal_kg: None,
            range: None,
            note: "Still growing: no ideal weight is set before 12 months of age.".to_string(),
        };
    }

    let range = breed_weight_range(breed, sex);
    if range.contains(current_weight_kg) {
        IdealWeightEstimate {
            ideal_kg: Some(current_weight_kg),
            range: Some(range),
            note: "Current weight is within the healthy range.".to_string(),
        }
    } else {
        IdealWeightEstimate {
            ideal_kg: Some(range.midpoint()),
            range: Some(range),
            note: format!(
                "Healthy range is {:.1}-{:.1} kg; target set to the middle of the range.",
                range.min_kg, range.max_kg
            ),
        }
    }
}

/// Classify the current weight against a range
pub fn weight_status(current_weight_kg: f64, range: Option<&WeightRange>) -> WeightStatus {
    match range {
        None => WeightStatus::Na,
        Some(r) if current_weight_kg < r.min_kg => WeightStatus::Low,
        Some(r) if current_weight_kg > r.max_kg => WeightStatus::High,
        Some(_) => WeightStatus::Ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_breed_male_in_range() {
        let estimate = estimate_ideal_weight(Breed::MaineCoon, Sex::Male, 36.0, 8.0);
        let range = estimate.range.unwrap();
        assert_eq!(range, WeightRange::new(6.5, 11.0));
        assert_eq!(estimate.ideal_kg, Some(8.0));
        assert_eq!(weight_status(8.0, estimate.range.as_ref()), WeightStatus::Ok);
    }

    #[test]
    fn test_small_breed_female_below_range() {
        let estimate = estimate_ideal_weight(Breed::Singapura, Sex::Female, 24.0, 1.5);
        assert_eq!(weight_status(1.5, estimate.range.as_ref()), WeightStatus::Low);
        assert!((estimate.ideal_kg.unwrap() - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_overweight_is_high() {
        let estimate = estimate_ideal_weight(Breed::Siamese, Sex::Female, 48.0, 6.0);
        assert_eq!(weight_status(6.0, estimate.range.as_ref()), WeightStatus::High);
        assert!((estimate.ideal_kg.unwrap() - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_growing_kitten_has_no_estimate() {
        let estimate = estimate_ideal_weight(Breed::MaineCoon, Sex::Male, 8.0, 3.0);
        assert_eq!(estimate.ideal_kg, None);
        assert_eq!(estimate.range, None);
        assert_eq!(weight_status(3.0, estimate.range.as_ref()), WeightStatus::Na);
    }

    #[test]
    fn test_unknown_breed_uses_default_range() {
        assert_eq!(breed_weight_range(Breed::Other, Sex::Male), DEFAULT_RANGE_MALE);
        assert_eq!(breed_weight_range(Breed::Mixed, Sex::Female), DEFAULT_RANGE_FEMALE);
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = breed_weight_range(Breed::Bengal, Sex::Female);
        assert_eq!(weight_status(3.5, Some(&range)), WeightStatus::Ok);
        assert_eq!(weight_status(5.5, Some(&range)), WeightStatus::Ok);
    }
}
