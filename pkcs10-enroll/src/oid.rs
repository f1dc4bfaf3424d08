/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#![allow(non_upper_case_globals)]

use std::collections::HashMap;

use crate::types::ObjectIdentifier;

lazy_static! {
    // X.500 attribute types
    pub static ref commonName: ObjectIdentifier = vec![2, 5, 4, 3].into();
    pub static ref countryName: ObjectIdentifier = vec![2, 5, 4, 6].into();
    pub static ref stateOrProvinceName: ObjectIdentifier = vec![2, 5, 4, 8].into();
    pub static ref organizationName: ObjectIdentifier = vec![2, 5, 4, 10].into();
    pub static ref organizationalUnitName: ObjectIdentifier = vec![2, 5, 4, 11].into();

    // PKCS #1
    pub static ref rsaEncryption: ObjectIdentifier = vec![1, 2, 840, 113549, 1, 1, 1].into();
    pub static ref sha256WithRSAEncryption: ObjectIdentifier = vec![1, 2, 840, 113549, 1, 1, 11].into();

    // Elliptic curves. Reference: RFC5480, 2.1.1.1
    pub static ref ecPublicKey: ObjectIdentifier = vec![1, 2, 840, 10045, 2, 1].into();
    pub static ref NistP256: ObjectIdentifier = vec![1, 2, 840, 10045, 3, 1, 7].into();
    pub static ref NistP384: ObjectIdentifier = vec![1, 3, 132, 0, 34].into();

    // ECDSA signatures. Reference: RFC5758, 3.2
    pub static ref ecdsaWithSHA256: ObjectIdentifier = vec![1, 2, 840, 10045, 4, 3, 2].into();
    pub static ref ecdsaWithSHA384: ObjectIdentifier = vec![1, 2, 840, 10045, 4, 3, 3].into();
}

lazy_static! {
    /// Short names used when rendering a distinguished name, RFC4514 style.
    pub static ref OID_TO_NAME: HashMap<ObjectIdentifier, &'static str> = {
        let mut map = HashMap::new();
        map.insert(countryName.clone(), "C");
        map.insert(stateOrProvinceName.clone(), "ST");
        map.insert(organizationName.clone(), "O");
        map.insert(organizationalUnitName.clone(), "OU");
        map.insert(commonName.clone(), "CN");
        map
    };
}
