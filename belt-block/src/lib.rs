#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

#[cfg(feature = "std")]
extern crate std;

mod block;
mod schedule;
mod sbox;
mod util;

pub use cipher;
pub use cipher::Array;
pub use cipher::typenum::consts;
pub use schedule::InvalidKeyLength;

use cipher::{
    Block, BlockCipherDecBackend, BlockCipherDecClosure, BlockCipherDecrypt,
    BlockCipherEncBackend, BlockCipherEncClosure, BlockCipherEncrypt, BlockSizeUser, Key, KeyInit,
    KeySizeUser, ParBlocksSizeUser,
    consts::{U1, U16, U32},
    inout::InOut,
};

use block::RoundKeys;

/// The Belt block cipher (STB 34.101.31 §6).
///
/// `BeltBlock` operates on pre-expanded 32-octet key material. Callers
/// with a 16/24-octet key should go through [`BeltBlock::new_from_variable_key`],
/// which performs the key-schedule expansion from §4.1 before
/// constructing the cipher.
#[derive(Clone)]
pub struct BeltBlock {
    keys: RoundKeys,
}

impl BeltBlock {
    /// Construct a `BeltBlock` from a 16, 24 or 32-octet key, applying the
    /// STB 34.101.31 §4.1 key-schedule expansion first.
    pub fn new_from_variable_key(key: &[u8]) -> Result<Self, InvalidKeyLength> {
        let words = schedule::expand(key)?;
        Ok(Self {
            keys: RoundKeys::new(words),
        })
    }
}

impl KeySizeUser for BeltBlock {
    type KeySize = U32;
}

impl KeyInit for BeltBlock {
    fn new(key: &Key<Self>) -> Self {
        let words = schedule::expand(key).expect("U32 key is always a valid length");
        Self {
            keys: RoundKeys::new(words),
        }
    }
}

impl BlockSizeUser for BeltBlock {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for BeltBlock {
    type ParBlocksSize = U1;
}

impl BlockCipherEncBackend for BeltBlock {
    fn encrypt_block(&self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut words = words_from_block(block.get_in());
        block::encrypt(&self.keys, &mut words);
        write_block(block.get_out(), &words);
    }
}

impl BlockCipherEncrypt for BeltBlock {
    fn encrypt_with_backend(&self, f: impl BlockCipherEncClosure<BlockSize = Self::BlockSize>) {
        f.call(self)
    }
}

impl BlockCipherDecBackend for BeltBlock {
    fn decrypt_block(&self, mut block: InOut<'_, '_, Block<Self>>) {
        let mut words = words_from_block(block.get_in());
        block::decrypt(&self.keys, &mut words);
        write_block(block.get_out(), &words);
    }
}

impl BlockCipherDecrypt for BeltBlock {
    fn decrypt_with_backend(&self, f: impl BlockCipherDecClosure<BlockSize = Self::BlockSize>) {
        f.call(self)
    }
}

fn words_from_block(block: &Block<BeltBlock>) -> [u32; 4] {
    let mut out = [0u32; 4];
    for (word, chunk) in out.iter_mut().zip(block.chunks_exact(4)) {
        *word = util::load_le_u32(chunk);
    }
    out
}

fn write_block(block: &mut Block<BeltBlock>, words: &[u32; 4]) {
    for (word, chunk) in words.iter().zip(block.chunks_exact_mut(4)) {
        util::store_le_u32(*word, chunk);
    }
}
