//! Reed-Solomon error correction over GF(2^8) with the QR primitive polynomial
//! x^8 + x^4 + x^3 + x^2 + 1 (0x11D).

/// Multiply two field elements (Russian peasant multiplication).
pub fn gf_mul(x: u8, y: u8) -> u8 {
    let mut z: u8 = 0;
    for i in (0..8).rev() {
        z = (z << 1) ^ ((z >> 7) * 0x1D);
        z ^= ((y >> i) & 1) * x;
    }
    z
}

/// Coefficients of the generator polynomial of the given degree, highest power first,
/// with the leading 1 omitted.
///
/// The generator is the product (x - a^0)(x - a^1)...(x - a^(degree-1)) with a = 0x02.
pub fn generator(degree: usize) -> Vec<u8> {
    assert!((1..=255).contains(&degree), "degree out of range: {degree}");
    let mut result = vec![0u8; degree];
    result[degree - 1] = 1;

    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            result[j] = gf_mul(result[j], root);
            if j + 1 < degree {
                result[j] ^= result[j + 1];
            }
        }
        root = gf_mul(root, 0x02);
    }
    result
}

/// Remainder of `data * x^n` divided by the generator, i.e. the error correction codewords.
pub fn remainder(data: &[u8], generator: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; generator.len()];
    for &b in data {
        let factor = b ^ result[0];
        result.rotate_left(1);
        if let Some(last) = result.last_mut() {
            *last = 0;
        }
        for (r, &g) in result.iter_mut().zip(generator) {
            *r ^= gf_mul(g, factor);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf_mul_identities() {
        for x in 0..=255u8 {
            assert_eq!(gf_mul(x, 1), x);
            assert_eq!(gf_mul(x, 0), 0);
            assert_eq!(gf_mul(x, 2), gf_mul(2, x));
        }
        // a^8 reduces by the primitive polynomial
        assert_eq!(gf_mul(0x80, 0x02), 0x1D);
    }

    #[test]
    fn test_generator_degree_2() {
        // (x - 1)(x - 2) = x^2 + 3x + 2
        assert_eq!(generator(2), vec![0x03, 0x02]);
    }

    #[test]
    fn test_generator_degree_7() {
        // Exponents 87, 229, 146, 149, 238, 102, 21 of the standard degree-7 generator.
        assert_eq!(generator(7), vec![127, 122, 154, 164, 11, 68, 117]);
    }

    #[test]
    fn test_remainder_known_vector() {
        // "HELLO WORLD" at version 1-M, ISO/IEC 18004 annex example.
        let data = [
            0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        let ecc = remainder(&data, &generator(10));
        assert_eq!(
            ecc,
            vec![0xC4, 0x23, 0x27, 0x77, 0xEB, 0xD7, 0xE7, 0xE2, 0x5D, 0x17]
        );
    }

    #[test]
    fn test_codeword_polynomial_has_generator_roots() {
        let data = b"device payload";
        let degree = 10;
        let ecc = remainder(data, &generator(degree));
        let codeword: Vec<u8> = data.iter().chain(&ecc).copied().collect();

        // Evaluating at each root a^i must give zero.
        let mut root = 1u8;
        for _ in 0..degree {
            let value = codeword.iter().fold(0u8, |acc, &c| gf_mul(acc, root) ^ c);
            assert_eq!(value, 0);
            root = gf_mul(root, 0x02);
        }
    }
}
