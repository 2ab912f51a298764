use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Trigram country codes as used by the rating datasets' `Nat` columns,
/// mapped to the country names the scraped player pages spell out.
static COUNTRY_NAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRY_TABLE.iter().copied().collect());

/// Map a trigram nationality code to its country name; anything that is not
/// a known trigram passes through unchanged.
pub fn normalize_nationality(raw: &str) -> String {
    let trimmed = raw.trim();
    COUNTRY_NAMES
        .get(trimmed)
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

const COUNTRY_TABLE: &[(&str, &str)] = &[
    ("ARG", "Argentina"),
    ("BRA", "Brazil"),
    ("ITA", "Italy"),
    ("ESP", "Spain"),
    ("ENG", "England"),
    ("FRA", "France"),
    ("GER", "Germany"),
    ("BEL", "Belgium"),
    ("ROU", "Romania"),
    ("POR", "Portugal"),
    ("USA", "United States"),
    ("SWE", "Sweden"),
    ("NOR", "Norway"),
    ("HUN", "Hungary"),
    ("GRE", "Greece"),
    ("SUI", "Switzerland"),
    ("COL", "Colombia"),
    ("TUR", "Turkey"),
    ("URU", "Uruguay"),
    ("AUT", "Austria"),
    ("MEX", "Mexico"),
    ("SCO", "Scotland"),
    ("CHI", "Chile"),
    ("DEN", "Denmark"),
    ("POL", "Poland"),
    ("CHN", "China"),
    ("RSA", "South Africa"),
    ("CZE", "Czech Republic"),
    ("NED", "Netherlands"),
    ("PER", "Peru"),
    ("ISR", "Israel"),
    ("SRB", "Serbia"),
    ("RUS", "Russia"),
    ("BLR", "Belarus"),
    ("MAS", "Malaysia"),
    ("BUL", "Bulgaria"),
    ("NIR", "Northern Ireland"),
    ("UKR", "Ukraine"),
    ("ISL", "Iceland"),
    ("CRO", "Croatia"),
    ("IRL", "Republic of Ireland"),
    ("WAL", "Wales"),
    ("SVN", "Slovenia"),
    ("CAN", "Canada"),
    ("IDN", "Indonesia"),
    ("KOR", "South Korea"),
    ("SVK", "Slovakia"),
    ("NZL", "New Zealand"),
    ("FIN", "Finland"),
    ("AUS", "Australia"),
    ("NGA", "Nigeria"),
    ("GHA", "Ghana"),
    ("LVA", "Latvia"),
    ("BRU", "Brunei"),
    ("IND", "India"),
    ("CIV", "Ivory Coast (Côte d'Ivoire)"),
    ("SEN", "Senegal"),
    ("BIH", "Bosnia and Herzegovina"),
    ("MAR", "Morocco"),
    ("ALB", "Albania"),
    ("CMR", "Cameroon"),
    ("SIN", "Singapore"),
    ("VEN", "Venezuela"),
    ("FIJ", "Fiji"),
    ("KOS", "Kosovo"),
    ("SOL", "Solomon Islands"),
    ("HKG", "Hong Kong"),
    ("VAN", "Vanuatu"),
    ("NCL", "New Caledonia"),
    ("COD", "DR Congo"),
    ("PAR", "Paraguay"),
    ("GNB", "Guinea-Bissau"),
    ("MLI", "Mali"),
    ("ALG", "Algeria"),
    ("IRN", "Iran"),
    ("SAM", "Samoa"),
    ("GUI", "Guinea"),
    ("JPN", "Japan"),
    ("ECU", "Ecuador"),
    ("TUN", "Tunisia"),
    ("MKD", "North Macedonia"),
    ("PNG", "Papua New Guinea"),
    ("CPV", "Cape Verde"),
    ("UZB", "Uzbekistan"),
    ("SYR", "Syria"),
    ("EGY", "Egypt"),
    ("MNE", "Montenegro"),
    ("KSA", "Saudi Arabia"),
    ("ANG", "Angola"),
    ("GAM", "Gambia"),
    ("TAH", "Tahiti"),
    ("BER", "Bermuda"),
    ("JAM", "Jamaica"),
    ("LIE", "Liechtenstein"),
    ("BFA", "Burkina Faso"),
    ("IRQ", "Iraq"),
    ("GEO", "Georgia"),
    ("BOL", "Bolivia"),
    ("CRC", "Costa Rica"),
    ("MDA", "Moldova"),
    ("CGO", "Congo"),
    ("LUX", "Luxembourg"),
    ("COK", "Cook Islands"),
    ("HAI", "Haiti"),
    ("TOG", "Togo"),
    ("ZIM", "Zimbabwe"),
    ("PRK", "North Korea"),
    ("TRI", "Trinidad and Tobago"),
    ("THA", "Thailand"),
    ("LTU", "Lithuania"),
    ("GAB", "Gabon"),
    ("CUW", "Curaçao"),
    ("SLE", "Sierra Leone"),
    ("ZAM", "Zambia"),
    ("COM", "Comoros"),
    ("AFG", "Afghanistan"),
    ("QAT", "Qatar"),
    ("CYP", "Cyprus"),
    ("UGA", "Uganda"),
    ("ARM", "Armenia"),
    ("UAE", "United Arab Emirates"),
    ("BEN", "Benin"),
    ("PAN", "Panama"),
    ("ASA", "American Samoa"),
    ("LBR", "Liberia"),
    ("JOR", "Jordan"),
    ("AND", "Andorra"),
    ("PLE", "Palestine"),
    ("EQG", "Equatorial Guinea"),
    ("BHR", "Bahrain"),
    ("DOM", "Dominican Republic"),
    ("MOZ", "Mozambique"),
    ("SLV", "El Salvador"),
    ("KEN", "Kenya"),
    ("SUR", "Suriname"),
    ("MTQ", "Martinique"),
    ("GLP", "Guadeloupe"),
    ("LIB", "Lebanon"),
    ("AZE", "Azerbaijan"),
    ("MLT", "Malta"),
    ("HON", "Honduras"),
    ("CTA", "Central African Republic"),
    ("CUB", "Cuba"),
    ("MTN", "Mauritania"),
    ("TGA", "Tonga"),
    ("PHI", "Philippines"),
    ("TAN", "Tanzania"),
    ("OMA", "Oman"),
    ("GUY", "Guyana"),
    ("MAD", "Madagascar"),
    ("EST", "Estonia"),
    ("FRO", "Faroe Islands"),
    ("KUW", "Kuwait"),
    ("TUV", "Tuvalu"),
    ("BDI", "Burundi"),
    ("SOM", "Somalia"),
    ("KAZ", "Kazakhstan"),
    ("LBY", "Libya"),
    ("NIG", "Niger"),
    ("PUR", "Puerto Rico"),
    ("GIB", "Gibraltar"),
    ("GUF", "French Guiana"),
    ("NAM", "Namibia"),
    ("STP", "São Tomé and Príncipe"),
    ("TJK", "Tajikistan"),
    ("GRN", "Grenada"),
    ("ETH", "Ethiopia"),
    ("ATG", "Antigua and Barbuda"),
    ("RWA", "Rwanda"),
    ("ERI", "Eritrea"),
    ("VIE", "Vietnam"),
    ("SKN", "Saint Kitts and Nevis"),
    ("TKM", "Turkmenistan"),
    ("FSM", "Micronesia"),
    ("SUD", "Sudan"),
    ("MSR", "Montserrat"),
    ("KGZ", "Kyrgyzstan"),
    ("GUA", "Guatemala"),
    ("YEM", "Yemen"),
    ("SMR", "San Marino"),
    ("MWI", "Malawi"),
    ("TLS", "Timor-Leste"),
    ("TPE", "Chinese Taipei"),
    ("SSD", "South Sudan"),
    ("NEP", "Nepal"),
    ("ARU", "Aruba"),
    ("CHA", "Chad"),
    ("SRI", "Sri Lanka"),
    ("SMN", "Saint Martin"),
    ("LES", "Lesotho"),
    ("BRB", "Barbados"),
    ("BAH", "Bahamas"),
    ("LCA", "Saint Lucia"),
    ("VIN", "Saint Vincent and the Grenadines"),
    ("GUM", "Guam"),
    ("VGB", "British Virgin Islands"),
    ("BLZ", "Belize"),
    ("NCA", "Nicaragua"),
    ("MRI", "Mauritius"),
    ("MAC", "Macau"),
    ("PAK", "Pakistan"),
    ("MYA", "Myanmar"),
    ("CAY", "Cayman Islands"),
    ("BOT", "Botswana"),
    ("SMA", "Sint Maarten"),
    ("VIR", "U.S. Virgin Islands"),
    ("REU", "Réunion"),
    ("DMA", "Dominica"),
    ("TCA", "Turks and Caicos Islands"),
    ("BAN", "Bangladesh"),
    ("AIA", "Anguilla"),
    ("SEY", "Seychelles"),
    ("NMI", "Northern Mariana Islands"),
    ("MAY", "Mayotte"),
    ("DJI", "Djibouti"),
    ("MGL", "Mongolia"),
    ("SWZ", "Eswatini (Swaziland)"),
    ("LAO", "Laos"),
    ("BOE", "Bonaire"),
    ("CAM", "Cambodia"),
    ("MDV", "Maldives"),
    ("MON", "Monaco"),
];

#[cfg(test)]
mod tests {
    use super::normalize_nationality;

    #[test]
    fn known_trigrams_map() {
        assert_eq!(normalize_nationality("ENG"), "England");
        assert_eq!(normalize_nationality(" NED "), "Netherlands");
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(normalize_nationality("England"), "England");
        assert_eq!(normalize_nationality("XYZ"), "XYZ");
    }
}
