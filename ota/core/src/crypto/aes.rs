use aes::{
    Aes256,
    cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray},
};

use crate::constants::{SESSION_IV_LEN, SESSION_KEY_LEN};
use crate::error::UpdaterError;

/**
    AES-256-CTR keystream application, used for both directions.

    Key: 32-byte session key.
    IV: 16 bytes, taken whole as the initial counter block.
    Counter: the full block is a big-endian 128-bit integer, incremented by
             one per block and wrapping at 2^128.
    No padding: output length equals input length. A trailing partial block
    uses only as many keystream bytes as it needs.

    Encryption and decryption are the same operation.
*/
pub fn aes_ctr_apply(
    key: &[u8; SESSION_KEY_LEN],
    iv: &[u8; SESSION_IV_LEN],
    data: &[u8],
) -> Vec<u8> {
    let cipher = Aes256::new(key.into());
    let mut counter = u128::from_be_bytes(*iv);
    let mut out = Vec::with_capacity(data.len());

    for chunk in data.chunks(SESSION_IV_LEN) {
        let mut block = GenericArray::from(counter.to_be_bytes());
        cipher.encrypt_block(&mut block);
        for (byte, pad) in chunk.iter().zip(block.iter()) {
            out.push(byte ^ pad);
        }
        counter = counter.wrapping_add(1);
    }

    out
}

/**
    AES-256-CTR decryption with an IV received over the wire.

    The IV arrives as a decoded byte vector of unchecked length; anything
    other than one block is a malformed response.
*/
pub fn aes_ctr_decrypt(
    key: &[u8; SESSION_KEY_LEN],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, UpdaterError> {
    let iv: &[u8; SESSION_IV_LEN] = iv.try_into().map_err(|_| {
        UpdaterError::Protocol(format!(
            "IV must be {SESSION_IV_LEN} bytes, got {}",
            iv.len()
        ))
    })?;
    Ok(aes_ctr_apply(key, iv, ciphertext))
}
