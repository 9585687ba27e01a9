//! en-GB vocabulary used to assemble customer profiles.

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Oliver", "Amelia", "George", "Isla", "Harry", "Ava", "Jack", "Emily", "Jacob", "Sophia",
    "Charlie", "Grace", "Thomas", "Lily", "Oscar", "Freya", "William", "Ella", "James", "Poppy",
    "Henry", "Evie", "Alfie", "Charlotte", "Leo", "Florence", "Joshua", "Ruby", "Arthur", "Millie",
    "Edward", "Alice", "Samuel", "Daisy", "Benjamin", "Matilda", "Joseph", "Phoebe", "Daniel", "Eleanor",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Johnson", "Davies", "Robinson",
    "Wright", "Thompson", "Evans", "Walker", "White", "Roberts", "Green", "Hall", "Wood", "Jackson",
    "Clarke", "Patel", "Khan", "Lewis", "James", "Phillips", "Mason", "Mitchell", "Rose", "Davis",
    "Rodgers", "Hughes", "Edwards", "Turner", "Harris", "Cooper", "Ward", "Morris", "King", "Baker",
];

pub(crate) const PREFIXES: &[&str] = &["Mr", "Mrs", "Ms", "Miss", "Dr", "Mx"];

pub(crate) const STREET_NAMES: &[&str] = &[
    "Mill", "Church", "Station", "Victoria", "Park", "High", "Queen", "King", "Green", "Manor",
    "Kings", "Grange", "Chapel", "Windsor", "Orchard", "Willow", "Meadow", "Springfield", "Albert",
];

pub(crate) const STREET_SUFFIXES: &[&str] = &[
    "Road", "Street", "Lane", "Avenue", "Close", "Drive", "Way", "Gardens", "Crescent", "Place",
];

/// City and the county it sits in.
pub(crate) const CITIES: &[(&str, &str)] = &[
    ("Guildford", "Surrey"),
    ("Woking", "Surrey"),
    ("Epsom", "Surrey"),
    ("Shrewsbury", "Shropshire"),
    ("Telford", "Shropshire"),
    ("Ludlow", "Shropshire"),
    ("Reading", "Berkshire"),
    ("Slough", "Berkshire"),
    ("Oxford", "Oxfordshire"),
    ("Banbury", "Oxfordshire"),
    ("Cambridge", "Cambridgeshire"),
    ("Norwich", "Norfolk"),
    ("Ipswich", "Suffolk"),
    ("Exeter", "Devon"),
    ("Plymouth", "Devon"),
    ("Truro", "Cornwall"),
    ("Bath", "Somerset"),
    ("Lincoln", "Lincolnshire"),
    ("York", "North Yorkshire"),
    ("Harrogate", "North Yorkshire"),
    ("Durham", "County Durham"),
    ("Carlisle", "Cumbria"),
    ("Lancaster", "Lancashire"),
    ("Chester", "Cheshire"),
    ("Worcester", "Worcestershire"),
    ("Hereford", "Herefordshire"),
    ("Gloucester", "Gloucestershire"),
    ("Maidstone", "Kent"),
    ("Canterbury", "Kent"),
    ("Brighton", "East Sussex"),
    ("Chichester", "West Sussex"),
    ("Winchester", "Hampshire"),
];

pub(crate) const POSTCODE_AREAS: &[&str] = &[
    "GU", "SY", "TF", "RG", "SL", "OX", "CB", "NR", "IP", "EX", "PL", "TR", "BA", "LN", "YO",
    "HG", "DH", "CA", "LA", "CH", "WR", "HR", "GL", "ME", "CT", "BN", "PO", "SO",
];

pub(crate) const JOBS: &[&str] = &[
    "Firefighter",
    "Accountant, chartered",
    "Teacher, primary school",
    "Nurse, adult",
    "Software engineer",
    "Civil engineer, contracting",
    "Solicitor",
    "Pharmacist, community",
    "Architect",
    "Police officer",
    "Paramedic",
    "Electrician, domestic",
    "Librarian, public",
    "Journalist, newspaper",
    "Surveyor, quantity",
    "Farm manager",
    "Chef",
    "Dentist",
    "Physiotherapist",
    "Translator",
];

pub(crate) const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium", "doloremque",
    "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis", "quasi", "architecto",
    "beatae", "vitae", "dicta", "sunt", "explicabo", "nemo", "enim", "tempora", "magnam", "quaerat",
];

pub(crate) const URL_DOMAINS: &[&str] = &[
    "example.co.uk", "example.com", "example.org", "example.net", "example.org.uk",
];

pub(crate) const EMAIL_DOMAIN: &str = "@gmail.com";

pub(crate) const COUNTRY: &str = "United Kingdom";

/// Characters used for passwords: no delimiter or escape characters.
pub(crate) const PASSWORD_SPECIALS: &[u8] = b"!@#$%^&*()_+";
