//! Realistic en-GB customer profiles.
//!
//! Every text field is passed through [`sanitize_field`] so that records can be
//! written unquoted with the `|` delimiter.

use crate::vocab;
use bench_core::{sanitize_field, SeedRecord};
use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;

/// Latest birth date handed out (exclusive upper bound of the range).
const BIRTH_DATE_END: (i32, u32, u32) = (2000, 1, 1);
/// Earliest birth date handed out.
const BIRTH_DATE_START: (i32, u32, u32) = (1920, 1, 1);

/// Generate one customer profile.
pub fn generate_profile<R: Rng>(rng: &mut R) -> SeedRecord {
    let first = pick(rng, vocab::FIRST_NAMES);
    let last = pick(rng, vocab::LAST_NAMES);
    let email = format!("{first}.{last}{}", vocab::EMAIL_DOMAIN);
    let (city, county) = vocab::CITIES[rng.gen_range(0..vocab::CITIES.len())];
    let postcode = postcode(rng);

    let address = format!(
        "{} {} {}\n{}\n{}",
        rng.gen_range(1..200),
        pick(rng, vocab::STREET_NAMES),
        pick(rng, vocab::STREET_SUFFIXES),
        city,
        postcode
    );

    SeedRecord {
        additional_email: email.clone(),
        email,
        prefix: pick(rng, vocab::PREFIXES).to_string(),
        name: format!("{first} {last}"),
        birth_date: birth_date(rng),
        phone_number: format!(
            "01{:03} {:06}",
            rng.gen_range(0..1000),
            rng.gen_range(0..1_000_000)
        ),
        address: sanitize_field(&address),
        postcode,
        city: city.to_string(),
        county: county.to_string(),
        country: vocab::COUNTRY.to_string(),
        year_joined: rng.gen_range(1970..=2024).to_string(),
        time_joined: time_of_day(rng),
        link: link(rng),
        comments: pick(rng, vocab::WORDS).to_string(),
        occupation: sanitize_field(pick(rng, vocab::JOBS)),
        bank: routing_number(rng),
        password: password(rng),
    }
}

fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values[rng.gen_range(0..values.len())]
}

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Birth date rendered as `DD-MM-YYYY`.
fn birth_date<R: Rng>(rng: &mut R) -> String {
    let start = date(BIRTH_DATE_START);
    let span = (date(BIRTH_DATE_END) - start).num_days().max(1) as u64;
    let day = start
        .checked_add_days(Days::new(rng.gen_range(0..span)))
        .unwrap_or(start);
    day.format("%d-%m-%Y").to_string()
}

/// Time of day rendered as `HH:MM:SS`.
fn time_of_day<R: Rng>(rng: &mut R) -> String {
    let secs = rng.gen_range(0..86_400);
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)
        .unwrap_or_default()
        .format("%H:%M:%S")
        .to_string()
}

fn postcode<R: Rng>(rng: &mut R) -> String {
    let letter = |rng: &mut R| char::from(b'A' + rng.gen_range(0..26u8));
    format!(
        "{}{} {}{}{}",
        pick(rng, vocab::POSTCODE_AREAS),
        rng.gen_range(1..30),
        rng.gen_range(0..10),
        letter(rng),
        letter(rng)
    )
}

fn link<R: Rng>(rng: &mut R) -> String {
    let domain = pick(rng, vocab::URL_DOMAINS);
    if rng.gen_bool(0.5) {
        format!("https://www.{domain}/")
    } else {
        format!("https://{domain}/{}/", pick(rng, vocab::WORDS))
    }
}

/// Nine digit ABA routing number with a valid check digit.
fn routing_number<R: Rng>(rng: &mut R) -> String {
    let digits: Vec<u32> = (0..8).map(|_| rng.gen_range(0..10)).collect();
    let weighted = 3 * (digits[0] + digits[3] + digits[6])
        + 7 * (digits[1] + digits[4] + digits[7])
        + (digits[2] + digits[5]);
    let check = (10 - weighted % 10) % 10;

    digits
        .iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from(b'0' + *d as u8))
        .collect()
}

/// Ten character password with at least one special, digit, upper and lower.
fn password<R: Rng>(rng: &mut R) -> String {
    let classes: [&[u8]; 4] = [
        vocab::PASSWORD_SPECIALS,
        b"0123456789",
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        b"abcdefghijklmnopqrstuvwxyz",
    ];
    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    while chars.len() < 10 {
        let class = classes[rng.gen_range(0..classes.len())];
        chars.push(class[rng.gen_range(0..class.len())]);
    }
    // Fisher-Yates so the class order is not predictable.
    for i in (1..chars.len()).rev() {
        chars.swap(i, rng.gen_range(0..=i));
    }
    String::from_utf8_lossy(&chars).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_profile_is_delimiter_safe() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let record = generate_profile(&mut rng);
            assert!(record.is_delimiter_safe(), "unsafe record: {record:?}");
        }
    }

    #[test]
    fn test_profile_formats() {
        let mut rng = StdRng::seed_from_u64(42);
        let record = generate_profile(&mut rng);

        let parts: Vec<&str> = record.birth_date.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2] < "2000");

        assert_eq!(record.time_joined.len(), 8);
        assert_eq!(record.time_joined.matches(':').count(), 2);
        assert_eq!(record.email, record.additional_email);
        assert!(record.email.ends_with("@gmail.com"));
        assert_eq!(record.country, "United Kingdom");
        assert_eq!(record.password.len(), 10);
    }

    #[test]
    fn test_routing_number_checksum() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let aba = routing_number(&mut rng);
            let d: Vec<u32> = aba.chars().filter_map(|c| c.to_digit(10)).collect();
            assert_eq!(d.len(), 9);
            let sum = 3 * (d[0] + d[3] + d[6]) + 7 * (d[1] + d[4] + d[7]) + (d[2] + d[5] + d[8]);
            assert_eq!(sum % 10, 0);
        }
    }

    #[test]
    fn test_same_seed_same_profile() {
        let a = generate_profile(&mut StdRng::seed_from_u64(99));
        let b = generate_profile(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
