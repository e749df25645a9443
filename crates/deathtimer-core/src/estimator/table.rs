//! Base life expectancy by country of residence.

/// Base used when the country is not in [`LIFE_EXPECTANCY`].
pub const DEFAULT_LIFE_EXPECTANCY: i32 = 75;

/// Average life expectancy in whole years, keyed by country name.
///
/// Sorted by name so lookups can binary search and listings need no sort.
pub static LIFE_EXPECTANCY: &[(&str, i32)] = &[
    ("Afghanistan", 65),
    ("Albania", 79),
    ("Algeria", 77),
    ("Andorra", 84),
    ("Angola", 62),
    ("Antigua and Barbuda", 77),
    ("Argentina", 77),
    ("Armenia", 75),
    ("Australia", 83),
    ("Austria", 82),
    ("Azerbaijan", 73),
    ("Bahamas", 73),
    ("Bahrain", 79),
    ("Bangladesh", 73),
    ("Barbados", 79),
    ("Belarus", 75),
    ("Belgium", 82),
    ("Belize", 75),
    ("Benin", 62),
    ("Bhutan", 72),
    ("Bolivia", 71),
    ("Bosnia and Herzegovina", 78),
    ("Botswana", 70),
    ("Brazil", 76),
    ("Brunei", 77),
    ("Bulgaria", 75),
    ("Burkina Faso", 62),
    ("Burundi", 63),
    ("Cabo Verde", 74),
    ("Cambodia", 71),
    ("Cameroon", 60),
    ("Canada", 83),
    ("Central African Republic", 55),
    ("Chad", 55),
    ("Chile", 80),
    ("China", 77),
    ("Colombia", 77),
    ("Comoros", 65),
    ("Congo (Congo-Brazzaville)", 65),
    ("Costa Rica", 80),
    ("Croatia", 79),
    ("Cuba", 79),
    ("Cyprus", 82),
    ("Czech Republic", 80),
    ("Denmark", 81),
    ("Djibouti", 67),
    ("Dominica", 78),
    ("Dominican Republic", 74),
    ("Ecuador", 77),
    ("Egypt", 72),
    ("El Salvador", 74),
    ("Equatorial Guinea", 58),
    ("Eritrea", 66),
    ("Estonia", 79),
    ("Eswatini", 60),
    ("Ethiopia", 66),
    ("Fiji", 67),
    ("Finland", 82),
    ("France", 82),
    ("Gabon", 66),
    ("Gambia", 62),
    ("Georgia", 74),
    ("Germany", 81),
    ("Ghana", 64),
    ("Greece", 82),
    ("Grenada", 73),
    ("Guatemala", 74),
    ("Guinea", 61),
    ("Guinea-Bissau", 59),
    ("Guyana", 69),
    ("Haiti", 65),
    ("Honduras", 75),
    ("Hungary", 77),
    ("Iceland", 83),
    ("India", 71),
    ("Indonesia", 72),
    ("Iran", 77),
    ("Iraq", 71),
    ("Ireland", 82),
    ("Israel", 83),
    ("Italy", 83),
    ("Jamaica", 74),
    ("Japan", 85),
    ("Jordan", 74),
    ("Kazakhstan", 73),
    ("Kenya", 67),
    ("Kiribati", 68),
    ("Kuwait", 76),
    ("Kyrgyzstan", 72),
    ("Laos", 67),
    ("Latvia", 75),
    ("Lebanon", 79),
    ("Lesotho", 59),
    ("Liberia", 65),
    ("Libya", 73),
    ("Lithuania", 75),
    ("Luxembourg", 82),
    ("Madagascar", 67),
    ("Malawi", 65),
    ("Malaysia", 76),
    ("Maldives", 78),
    ("Mali", 60),
    ("Malta", 83),
    ("Marshall Islands", 71),
    ("Mauritania", 65),
    ("Mauritius", 74),
    ("Mexico", 75),
    ("Micronesia", 67),
    ("Moldova", 71),
    ("Monaco", 85),
    ("Mongolia", 70),
    ("Montenegro", 77),
    ("Morocco", 76),
    ("Mozambique", 60),
    ("Myanmar", 68),
    ("Namibia", 65),
    ("Nepal", 71),
    ("Netherlands", 82),
    ("New Zealand", 82),
    ("Nicaragua", 75),
    ("Niger", 62),
    ("Nigeria", 55),
    ("North Korea", 72),
    ("North Macedonia", 76),
    ("Norway", 83),
    ("Oman", 77),
    ("Pakistan", 67),
    ("Palau", 74),
    ("Panama", 78),
    ("Papua New Guinea", 64),
    ("Paraguay", 74),
    ("Peru", 77),
    ("Philippines", 71),
    ("Poland", 78),
    ("Portugal", 82),
    ("Qatar", 80),
    ("Romania", 76),
    ("Russia", 72),
    ("Rwanda", 69),
    ("Saint Kitts and Nevis", 75),
    ("Saint Lucia", 76),
    ("Saint Vincent and the Grenadines", 73),
    ("Samoa", 74),
    ("San Marino", 85),
    ("Sao Tome and Principe", 67),
    ("Saudi Arabia", 75),
    ("Senegal", 67),
    ("Serbia", 76),
    ("Seychelles", 73),
    ("Sierra Leone", 54),
    ("Singapore", 84),
    ("Slovakia", 77),
    ("Slovenia", 82),
    ("Solomon Islands", 72),
    ("Somalia", 57),
    ("South Africa", 64),
    ("South Korea", 84),
    ("South Sudan", 58),
    ("Spain", 84),
    ("Sri Lanka", 77),
    ("Sudan", 66),
    ("Suriname", 72),
    ("Sweden", 83),
    ("Switzerland", 84),
    ("Syria", 71),
    ("Taiwan", 81),
    ("Tajikistan", 71),
    ("Tanzania", 66),
    ("Thailand", 77),
    ("Timor-Leste", 69),
    ("Togo", 61),
    ("Tonga", 71),
    ("Trinidad and Tobago", 73),
    ("Tunisia", 77),
    ("Turkey", 78),
    ("Turkmenistan", 68),
    ("Tuvalu", 67),
    ("Uganda", 63),
    ("Ukraine", 71),
    ("United Arab Emirates", 78),
    ("United Kingdom", 81),
    ("United States", 79),
    ("Uruguay", 78),
    ("Uzbekistan", 72),
    ("Vanuatu", 71),
    ("Vatican City", 84),
    ("Venezuela", 72),
    ("Vietnam", 75),
    ("Yemen", 66),
    ("Zambia", 65),
    ("Zimbabwe", 62),
];

/// Looks up the base expectancy for `country`, `None` when unlisted.
pub fn base_life_expectancy(country: &str) -> Option<i32> {
    LIFE_EXPECTANCY
        .binary_search_by(|(name, _)| (*name).cmp(country))
        .ok()
        .map(|idx| LIFE_EXPECTANCY[idx].1)
}

/// Country names in picker order.
pub fn countries() -> impl Iterator<Item = &'static str> {
    LIFE_EXPECTANCY.iter().map(|(name, _)| *name)
}

/// Whether `country` has an entry in the table.
pub fn is_known_country(country: &str) -> bool {
    base_life_expectancy(country).is_some()
}
