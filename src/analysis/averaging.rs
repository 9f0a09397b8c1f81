use crate::db::models::{Average, RawReading};

/// Integer mean rounded half up. Returns `None` for an empty input.
pub fn rounded_mean<I>(values: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), value| (sum + u64::from(value), count + 1));

    if count == 0 {
        return None;
    }

    // floor((2 * sum + count) / (2 * count)) == round-half-up(sum / count) for sum >= 0
    Some(((2 * sum + count) / (2 * count)) as u32)
}

/// Average every complete reading; incomplete ones are dropped silently.
///
/// A reading is complete when systolic, diastolic and pulse are all present and
/// non-zero. `None` means "no data", not a failure.
pub fn average(readings: &[RawReading]) -> Option<Average> {
    let complete: Vec<_> = readings.iter().filter_map(RawReading::values).collect();

    Some(Average {
        systolic: rounded_mean(complete.iter().map(|v| v.systolic))?,
        diastolic: rounded_mean(complete.iter().map(|v| v.diastolic))?,
        pulse: rounded_mean(complete.iter().map(|v| v.pulse))?,
        count: complete.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_average() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn readings_missing_a_field_have_no_average() {
        let readings = vec![
            RawReading { systolic: Some(120), diastolic: Some(80), pulse: None },
            RawReading { systolic: None, diastolic: Some(80), pulse: Some(70) },
            RawReading { systolic: Some(0), diastolic: Some(80), pulse: Some(70) },
        ];
        assert_eq!(average(&readings), None);
    }

    #[test]
    fn averages_two_readings() {
        let readings = vec![RawReading::new(120, 80, 70), RawReading::new(130, 90, 80)];
        assert_eq!(
            average(&readings),
            Some(Average { systolic: 125, diastolic: 85, pulse: 75, count: 2 })
        );
    }

    #[test]
    fn count_reflects_only_complete_readings() {
        let readings = vec![
            RawReading::new(120, 80, 70),
            RawReading::default(),
            RawReading::parse("131", "", "72"),
            RawReading::new(123, 81, 71),
        ];
        let avg = average(&readings).unwrap();
        assert_eq!(avg.count, 2);
        // 243 / 2 = 121.5 rounds up
        assert_eq!(avg.systolic, 122);
        assert_eq!(avg.diastolic, 81);
        assert_eq!(avg.pulse, 71);
    }

    #[test]
    fn rounded_mean_rounds_half_up() {
        assert_eq!(rounded_mean([1, 2]), Some(2));
        assert_eq!(rounded_mean([1, 1, 2]), Some(1));
        assert_eq!(rounded_mean([1, 2, 2]), Some(2));
        assert_eq!(rounded_mean(Vec::<u32>::new()), None);
    }
}
