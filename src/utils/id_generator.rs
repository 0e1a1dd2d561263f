use std::sync::Arc;
use tinyrand::RandRange;
use tinyrand_std::thread_rand;

pub const CONNECTION_ID_LENGTH: usize = 8;

// No 0/O or 1/I, so ids survive being read out of a log.
const VALID_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

pub fn mini_id(length: usize) -> Arc<str> {
    let mut rng = thread_rand();
    (0..length)
        .map(|_| VALID_CHARS[rng.next_range(0..VALID_CHARS.len())] as char)
        .collect::<String>()
        .into()
}
