use getrandom::getrandom;
use oorandom::Rand64;

use super::record::{UserLocation, UserName, UserRecord};

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Boris", "Carla", "Dmitri", "Elena", "Farid", "Grace", "Hugo",
];
const LAST_NAMES: [&str; 8] = [
    "Adler", "Becker", "Cole", "Duarte", "Egorov", "Fischer", "Grant", "Haas",
];

/// A seed drawn from the operating system's entropy source.
pub fn os_random_seed() -> u128 {
    let mut buf = [0; 16];
    let _res = getrandom(&mut buf);
    u128::from_le_bytes(buf)
}

pub fn seeded_rng(seed: u128) -> Rand64 {
    Rand64::new(seed)
}

/// Iterator over synthetic user records with uniformly random coordinates.
///
/// All records share one precomputed password hash.
pub struct RandomUsers<'a> {
    produced: usize,
    count: usize,
    password_hash: String,
    rng: &'a mut Rand64,
}

impl<'a> RandomUsers<'a> {
    pub fn new(count: usize, password_hash: &str, rng: &'a mut Rand64) -> Self {
        RandomUsers {
            produced: 0,
            count,
            password_hash: password_hash.to_string(),
            rng,
        }
    }
}

impl<'a> Iterator for RandomUsers<'a> {
    type Item = UserRecord;

    fn next(&mut self) -> Option<UserRecord> {
        if self.produced == self.count {
            return None;
        }

        let index = self.produced;
        self.produced += 1;

        let first = FIRST_NAMES[self.rng.rand_range(0..FIRST_NAMES.len() as u64) as usize];
        let last = LAST_NAMES[self.rng.rand_range(0..LAST_NAMES.len() as u64) as usize];
        let lat = self.rng.rand_float() * 180.0 - 90.0;
        let lng = self.rng.rand_float() * 360.0 - 180.0;

        let mut record = UserRecord::new(&format!("user_{:05}", index), &self.password_hash);
        record.name = Some(UserName {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
        });
        record.location = Some(UserLocation::from_degrees(lat, lng));

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.produced;
        (remaining, Some(remaining))
    }
}
