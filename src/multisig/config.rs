// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The `GroupConfig` JSON format: a joint public key plus the ordered list
//! of member signers (host, port, public key). Member order is the
//! canonical signer index used throughout a session.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::keys::SchnorrPublicKey;
use crate::multisig::algebra::joint_public_key;

/// One signer in a [`GroupConfig`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "HostName")]
    pub host_name: String,
    #[serde(rename = "Port")]
    pub port: u16,
    #[serde(rename = "PKey")]
    pub pkey: HexPublicKey,
}

/// A [`SchnorrPublicKey`] serialized as `{"Y": "<hex>"}`, matching the
/// on-disk JSON format.
#[derive(Clone, Copy, Debug)]
pub struct HexPublicKey(pub SchnorrPublicKey);

impl Serialize for HexPublicKey {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr {
            #[serde(rename = "Y")]
            y: String,
        }
        Repr {
            y: hex::encode(self.0.to_bytes()),
        }
        .serialize(ser)
    }
}

impl<'de> Deserialize<'de> for HexPublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(rename = "Y")]
            y: String,
        }
        let repr = Repr::deserialize(de)?;
        let bytes = hex::decode(&repr.y).map_err(serde::de::Error::custom)?;
        let key = SchnorrPublicKey::from_bytes(&bytes).map_err(serde::de::Error::custom)?;
        Ok(HexPublicKey(key))
    }
}

/// The group configuration distributed to the client and every signer: the
/// joint public key and the ordered member list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(rename = "JointKey")]
    pub joint_key: HexPublicKey,
    #[serde(rename = "Members")]
    pub members: Vec<Member>,
}

impl GroupConfig {
    /// Builds a group config from an ordered list of `(host, port, pubkey)`
    /// members, computing the joint key as their sum.
    pub fn from_members(members: Vec<(String, u16, SchnorrPublicKey)>) -> Self {
        let pubkeys: Vec<_> = members.iter().map(|(_, _, k)| *k).collect();
        let joint_key = joint_public_key(&pubkeys);
        GroupConfig {
            joint_key: HexPublicKey(joint_key),
            members: members
                .into_iter()
                .map(|(host_name, port, pkey)| Member {
                    host_name,
                    port,
                    pkey: HexPublicKey(pkey),
                })
                .collect(),
        }
    }

    /// Parses a `GroupConfig` from its on-disk JSON representation.
    pub fn from_json(data: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(data)?)
    }

    /// Serializes this `GroupConfig` to its on-disk JSON representation.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::DefaultSuite;
    use crate::keys::SchnorrKeypair;

    #[test]
    fn group_config_round_trips_through_json() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let a = SchnorrKeypair::generate(&suite, &mut rng).public();
        let b = SchnorrKeypair::generate(&suite, &mut rng).public();

        let config = GroupConfig::from_members(vec![
            ("signer-a.example".into(), 9001, a),
            ("signer-b.example".into(), 9002, b),
        ]);
        let json = config.to_json().unwrap();
        let reloaded = GroupConfig::from_json(&json).unwrap();

        assert_eq!(reloaded.members.len(), 2);
        assert_eq!(reloaded.joint_key.0, config.joint_key.0);
        assert_eq!(reloaded.joint_key.0, a + b);
    }
}
