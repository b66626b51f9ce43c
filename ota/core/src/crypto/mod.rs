pub mod aes;
pub mod random;
pub mod rsa;
