//! The fixed screening catalog. A single screen, so the movie list and the
//! daily slot labels are compile-time constants rather than store content.

/// Movies currently on the marquee.
pub const MOVIES: [&str; 5] = [
    "Suraj par mangal bhari",
    "Tenet",
    "The war with grandpa",
    "The personal history of David Copperfield",
    "Come Play",
];

/// Daily showtimes, as the 12-hour labels shown to the user.
pub const SLOTS: [&str; 4] = ["10:00 AM", "01:00 PM", "03:00 PM", "08:00 PM"];

/// Display price per seat. Charged nowhere; the client shows it as a total.
pub const SEAT_PRICE: i64 = 180;

pub fn is_listed_movie(name: &str) -> bool {
    MOVIES.contains(&name)
}

pub fn is_listed_slot(label: &str) -> bool {
    SLOTS.contains(&label)
}
