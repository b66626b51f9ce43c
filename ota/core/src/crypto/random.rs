use rand::{TryRngCore, rngs::OsRng};

use crate::error::UpdaterResult;

/**
    Fill a fixed-size array from the operating system's CSPRNG.

    Fails instead of falling back to a weaker source when the OS cannot
    provide entropy.
*/
pub fn random_bytes<const N: usize>() -> UpdaterResult<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}
