//! Table-driven conversion for arithmetic calendars.
//!
//! Calendars with fixed month lengths and a regular leap cycle can share one
//! pair of conversion routines, parameterized per calendar (E. G. Richards,
//! "Calendars", table 15.14).

/// Parameters of one arithmetic calendar.
#[derive(Debug, Clone, Copy)]
pub struct Params {
    pub y: i64,
    pub j: i64,
    pub m: i64,
    pub n: i64,
    pub r: i64,
    pub p: i64,
    pub q: i64,
    pub v: i64,
    pub u: i64,
    pub s: i64,
    pub t: i64,
    pub w: i64,
}

/// Egyptian civil calendar, 365-day years without leap days.
pub const EGYPTIAN: Params = Params {
    y: 3968,
    j: 47,
    m: 0,
    n: 13,
    r: 1,
    p: 365,
    q: 0,
    v: 0,
    u: 1,
    s: 30,
    t: 0,
    w: 0,
};

/// Coptic calendar, leap day every fourth year.
pub const COPTIC: Params = Params {
    y: 4996,
    j: 124,
    m: 0,
    n: 13,
    r: 4,
    p: 1461,
    q: 0,
    v: 3,
    u: 1,
    s: 30,
    t: 0,
    w: 0,
};

pub const fn to_julian_day(params: &Params, year: i64, month: u32, day: u32) -> i64 {
    let h = month as i64 - params.m;
    let g = year + params.y - (params.n - h).div_euclid(params.n);
    let f = (h - 1 + params.n).rem_euclid(params.n);
    let e = (params.p * g + params.q).div_euclid(params.r) + day as i64 - 1 - params.j;
    e + (params.s * f + params.t).div_euclid(params.u)
}

pub const fn from_julian_day(params: &Params, julian_day: i64) -> (i64, u32, u32) {
    let f = julian_day + params.j;
    let e = params.r * f + params.v;
    let g = e.rem_euclid(params.p).div_euclid(params.r);
    let h = params.u * g + params.w;
    let day = h.rem_euclid(params.s).div_euclid(params.u) + 1;
    let month = (h.div_euclid(params.s) + params.m).rem_euclid(params.n) + 1;
    let year = e.div_euclid(params.p) - params.y + (params.n + params.m - month).div_euclid(params.n);
    (year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coptic_epoch() {
        assert_eq!(to_julian_day(&COPTIC, 1, 1, 1), 1_825_030);
        assert_eq!(from_julian_day(&COPTIC, 1_825_030), (1, 1, 1));
    }

    #[test]
    fn test_egyptian_epoch() {
        assert_eq!(to_julian_day(&EGYPTIAN, 1, 1, 1), 1_448_638);
        assert_eq!(from_julian_day(&EGYPTIAN, 1_448_638), (1, 1, 1));
    }

    #[test]
    fn test_coptic_leap_day_precedes_new_year() {
        let leap_day = to_julian_day(&COPTIC, 3, 13, 6);
        assert_eq!(from_julian_day(&COPTIC, leap_day), (3, 13, 6));
        assert_eq!(from_julian_day(&COPTIC, leap_day + 1), (4, 1, 1));
    }

    #[test]
    fn test_julian_day_zero_converts_both_ways() {
        let (year, month, day) = from_julian_day(&EGYPTIAN, 0);
        assert_eq!(to_julian_day(&EGYPTIAN, year, month, day), 0);
    }
}
