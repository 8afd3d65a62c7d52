// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Property tests for canonical encode/decode round-trips.

use proptest::prelude::*;

use schnorr_sessions::blind::algebra::{BlindSignature, Challenge, SignerPublicParams, SignerResponse};
use schnorr_sessions::group::{DefaultSuite, Point, Scalar, Suite};
use schnorr_sessions::keys::SchnorrKeypair;
use schnorr_sessions::signature::{sign, verify, SchnorrSignature};

fn arb_scalar() -> impl Strategy<Value = Scalar> {
    any::<[u8; 32]>().prop_map(|seed| {
        let suite = DefaultSuite;
        let mut rng = rand_chacha_from_seed(seed);
        suite.random_scalar(&mut rng)
    })
}

fn arb_point() -> impl Strategy<Value = Point> {
    arb_scalar().prop_map(|s| {
        let suite = DefaultSuite;
        s * suite.basepoint()
    })
}

// proptest's `any::<[u8; 32]>()` gives us arbitrary bytes to seed a
// deterministic RNG from, since `Scalar` itself has no `Arbitrary` impl.
fn rand_chacha_from_seed(seed: [u8; 32]) -> rand_chacha::ChaCha20Rng {
    use rand_chacha::rand_core::SeedableRng;
    rand_chacha::ChaCha20Rng::from_seed(seed)
}

proptest! {
    #[test]
    fn scalar_round_trips_through_bytes(s in arb_scalar()) {
        let decoded = Scalar::from_bytes(&s.to_bytes()).unwrap();
        prop_assert_eq!(s, decoded);
    }

    #[test]
    fn point_round_trips_through_bytes(s in arb_scalar()) {
        let suite = DefaultSuite;
        let p = s * suite.basepoint();
        let decoded = schnorr_sessions::group::Point::from_bytes(&p.to_bytes()).unwrap();
        prop_assert_eq!(p, decoded);
    }

    #[test]
    fn schnorr_signature_round_trips_through_bytes(seed in any::<[u8; 32]>(), msg in proptest::collection::vec(any::<u8>(), 0..256)) {
        let suite = DefaultSuite;
        let mut rng = rand_chacha_from_seed(seed);
        let keypair = SchnorrKeypair::generate(&suite, &mut rng);
        let sig = sign(&suite, &keypair, &mut rng, &msg);

        let decoded = SchnorrSignature::from_bytes(&sig.to_bytes()).unwrap();
        prop_assert_eq!(sig, decoded);
        prop_assert!(verify(&suite, &keypair.public(), &msg, &decoded));
    }

    #[test]
    fn signer_public_params_round_trip_through_bytes(a in arb_point(), b in arb_point()) {
        let params = SignerPublicParams { a, b };
        let decoded = SignerPublicParams::from_bytes(&params.to_bytes()).unwrap();
        prop_assert_eq!(params.to_bytes(), decoded.to_bytes());
    }

    #[test]
    fn signer_response_round_trips_through_bytes(r in arb_scalar(), c in arb_scalar(), s in arb_scalar(), d in arb_scalar()) {
        let response = SignerResponse { r, c, s, d };
        let decoded = SignerResponse::from_bytes(&response.to_bytes()).unwrap();
        prop_assert_eq!(response.to_bytes(), decoded.to_bytes());
    }

    #[test]
    fn challenge_round_trips_through_bytes(e in arb_scalar()) {
        let challenge = Challenge(e);
        let decoded = Challenge::from_bytes(&challenge.to_bytes()).unwrap();
        prop_assert_eq!(challenge.to_bytes(), decoded.to_bytes());
    }

    #[test]
    fn blind_signature_round_trips_through_bytes(rho in arb_scalar(), omega in arb_scalar(), sigma in arb_scalar(), delta in arb_scalar()) {
        let sig = BlindSignature { rho, omega, sigma, delta };
        let decoded = BlindSignature::from_bytes(&sig.to_bytes()).unwrap();
        prop_assert_eq!(sig.to_bytes(), decoded.to_bytes());
    }
}
