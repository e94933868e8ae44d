use core::fmt::{self, Display};

/// Occupancy at or above this is shown orange.
pub const ORANGE_FROM: f64 = 33.0;
/// Occupancy at or above this is shown red.
pub const RED_FROM: f64 = 70.0;

/// Share of a timetable slot's seats that are taken, in percent.
///
/// Not clamped: an over-enrolled slot reports more than 100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Occupancy(f64);

impl Occupancy {
    /// `enrolled * 100 / capacity`. A slot without any capacity counts as full.
    #[must_use]
    pub fn new(enrolled: usize, capacity: u32) -> Self {
        if capacity == 0 {
            return Self(100.0);
        }
        let enrolled = f64::from(u32::try_from(enrolled).unwrap_or(u32::MAX));
        Self(enrolled * 100.0 / f64::from(capacity))
    }

    #[must_use]
    pub const fn percent(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn color(self) -> SeatColor {
        SeatColor::classify(self)
    }
}

impl Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeatColor {
    Green,
    Orange,
    Red,
}

impl SeatColor {
    #[must_use]
    pub fn classify(occupancy: Occupancy) -> Self {
        let percent = occupancy.percent();
        if percent >= RED_FROM {
            Self::Red
        } else if percent >= ORANGE_FROM {
            Self::Orange
        } else {
            Self::Green
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl Display for SeatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Occupancy, SeatColor};

    #[test]
    fn ten_seats() {
        assert_eq!(Occupancy::new(3, 10).percent(), 30.0);
        assert_eq!(Occupancy::new(3, 10).color(), SeatColor::Green);
        assert_eq!(Occupancy::new(4, 10).percent(), 40.0);
        assert_eq!(Occupancy::new(4, 10).color(), SeatColor::Orange);
        assert_eq!(Occupancy::new(8, 10).percent(), 80.0);
        assert_eq!(Occupancy::new(8, 10).color(), SeatColor::Red);
    }

    #[test]
    fn bucket_edges() {
        // 33 of 100 and 70 of 100 sit exactly on the edges
        assert_eq!(Occupancy::new(32, 100).color(), SeatColor::Green);
        assert_eq!(Occupancy::new(33, 100).color(), SeatColor::Orange);
        assert_eq!(Occupancy::new(69, 100).color(), SeatColor::Orange);
        assert_eq!(Occupancy::new(70, 100).color(), SeatColor::Red);
        // 1 of 3 is 33.33..
        assert_eq!(Occupancy::new(1, 3).color(), SeatColor::Orange);
        assert_eq!(Occupancy::new(0, 3).color(), SeatColor::Green);
    }

    #[test]
    fn classification_matches_thresholds_everywhere() {
        for capacity in 1..=40_u32 {
            for enrolled in 0..=50_usize {
                let occupancy = Occupancy::new(enrolled, capacity);
                let percent = occupancy.percent();
                let expected = if percent < 33.0 {
                    SeatColor::Green
                } else if percent < 70.0 {
                    SeatColor::Orange
                } else {
                    SeatColor::Red
                };
                assert_eq!(occupancy.color(), expected, "{enrolled}/{capacity}");
            }
        }
    }

    #[test]
    fn monotonic_in_enrolled_students() {
        for capacity in [1_u32, 7, 10, 30] {
            let percents: Vec<f64> = (0..=60_usize)
                .map(|enrolled| Occupancy::new(enrolled, capacity).percent())
                .collect();
            assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[test]
    fn overfull_and_capacityless_slots_are_red() {
        assert_eq!(Occupancy::new(12, 10).percent(), 120.0);
        assert_eq!(Occupancy::new(12, 10).color(), SeatColor::Red);
        assert_eq!(Occupancy::new(0, 0).color(), SeatColor::Red);
    }

    #[test]
    fn display() {
        assert_eq!(Occupancy::new(1, 3).to_string(), "33%");
        assert_eq!(SeatColor::Orange.to_string(), "orange");
    }
}
