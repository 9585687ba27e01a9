//! The synthetic customer record and its on-disk column layout.

/// Delimiter used between fields of a partition file.
///
/// Generated content never contains this character.
pub const FIELD_DELIMITER: u8 = b'|';

/// Column names of the target table, in partition file order.
pub const COLUMNS: [&str; 19] = [
    "Id",
    "Email",
    "Prefix",
    "Name",
    "Birth_Date",
    "Phone_Number",
    "Additional_Email",
    "Address",
    "Postcode",
    "City",
    "County",
    "Country",
    "Yearjoined",
    "Timejoined",
    "Link",
    "Comments",
    "Occupation",
    "Bank",
    "Password",
];

/// A synthetic person profile.
///
/// Every field is stored pre-rendered so that emitting a row is a plain
/// copy. `birth_date` uses `DD-MM-YYYY` and `time_joined` uses `HH:MM:SS`.
/// The identifier is not part of the record: it is assigned per emitted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRecord {
    pub email: String,
    pub prefix: String,
    pub name: String,
    pub birth_date: String,
    pub phone_number: String,
    pub additional_email: String,
    pub address: String,
    pub postcode: String,
    pub city: String,
    pub county: String,
    pub country: String,
    pub year_joined: String,
    pub time_joined: String,
    pub link: String,
    pub comments: String,
    pub occupation: String,
    pub bank: String,
    pub password: String,
}

impl SeedRecord {
    /// Fields after the identifier, in [`COLUMNS`] order.
    pub fn fields(&self) -> [&str; 18] {
        [
            &self.email,
            &self.prefix,
            &self.name,
            &self.birth_date,
            &self.phone_number,
            &self.additional_email,
            &self.address,
            &self.postcode,
            &self.city,
            &self.county,
            &self.country,
            &self.year_joined,
            &self.time_joined,
            &self.link,
            &self.comments,
            &self.occupation,
            &self.bank,
            &self.password,
        ]
    }

    /// Whether every field can be written unquoted to a partition file.
    pub fn is_delimiter_safe(&self) -> bool {
        self.fields().iter().all(|field| is_field_safe(field))
    }
}

/// Whether a single field is free of delimiter, line break and escape characters.
pub fn is_field_safe(field: &str) -> bool {
    !field
        .bytes()
        .any(|b| b == FIELD_DELIMITER || b == b'\n' || b == b'\r' || b == b'\\')
}

/// Strip characters that would break an unquoted delimited row.
///
/// Line breaks become spaces so that multi-line addresses stay readable.
pub fn sanitize_field(field: &str) -> String {
    field
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' => Some(' '),
            '|' | '\\' => None,
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SeedRecord {
        SeedRecord {
            email: "Jane.Doe@gmail.com".to_string(),
            prefix: "Dr".to_string(),
            name: "Jane Doe".to_string(),
            birth_date: "04-07-1985".to_string(),
            phone_number: "01632 960123".to_string(),
            additional_email: "Jane.Doe@gmail.com".to_string(),
            address: "12 Mill Lane Guildford".to_string(),
            postcode: "GU1 3AA".to_string(),
            city: "Guildford".to_string(),
            county: "Surrey".to_string(),
            country: "United Kingdom".to_string(),
            year_joined: "2011".to_string(),
            time_joined: "13:45:02".to_string(),
            link: "https://www.example.co.uk/".to_string(),
            comments: "tempora".to_string(),
            occupation: "Firefighter".to_string(),
            bank: "021000021".to_string(),
            password: "x7&Kq9!pLm".to_string(),
        }
    }

    #[test]
    fn test_fields_follow_column_order() {
        let record = sample_record();
        let fields = record.fields();

        assert_eq!(fields.len() + 1, COLUMNS.len());
        assert_eq!(fields[0], "Jane.Doe@gmail.com");
        assert_eq!(fields[3], "04-07-1985");
        assert_eq!(fields[9], "Surrey");
        assert_eq!(fields[17], "x7&Kq9!pLm");
    }

    #[test]
    fn test_sanitize_field() {
        assert_eq!(sanitize_field("12 Mill Lane\nGuildford"), "12 Mill Lane Guildford");
        assert_eq!(sanitize_field("a|b\\c"), "abc");
        assert!(is_field_safe(&sanitize_field("x|\r\n\\y")));
    }

    #[test]
    fn test_delimiter_safety() {
        let mut record = sample_record();
        assert!(record.is_delimiter_safe());

        record.comments = "bad|value".to_string();
        assert!(!record.is_delimiter_safe());
    }
}
