// Copyright (C) 2024 Red Hat, Inc.
//
// Permission is hereby granted, free of charge, to any
// person obtaining a copy of this software and associated
// documentation files (the "Software"), to deal in the
// Software without restriction, including without
// limitation the rights to use, copy, modify, merge,
// publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software
// is furnished to do so, subject to the following
// conditions:
//
// The above copyright notice and this permission notice
// shall be included in all copies or substantial portions
// of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF
// ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED
// TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
// SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY
// CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR
// IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

use super::client::CimClient;
use super::data::*;
use super::error::*;

/// Interop namespaces probed for registered profiles, in probing order.
pub const CANDIDATE_NAMESPACES: [&str; 3] =
    ["interop", "root/interop", "root/PG_Interop"];

pub const REGISTERED_PROFILE_CLASS: &str = "CIM_RegisteredProfile";
pub const CONFORMS_TO_PROFILE_CLASS: &str = "CIM_ElementConformsToProfile";
pub const COMPUTER_SYSTEM_CLASS: &str = "CIM_ComputerSystem";

/// `RegisteredOrganization` value of profiles defined by SNIA.
pub const SNIA_ORGANIZATION: i64 = 11;
pub const ARRAY_PROFILE_NAME: &str = "Array";

const PROP_REGISTERED_ORGANIZATION: &str = "RegisteredOrganization";
const PROP_REGISTERED_NAME: &str = "RegisteredName";

/// Find the registered SNIA `Array` profile.
///
/// The namespaces of [`CANDIDATE_NAMESPACES`][1] are enumerated in order
/// and the first matching instance is returned together with the namespace
/// it lives in. A namespace the server does not know is skipped silently,
/// any other enumeration failure is logged and skipped.
///
/// # Errors
///
///  * [`PingError::AuthenticationFailed`][2] on the first access denied
///    reply, remaining namespaces are not tried.
///  * [`PingError::TypeConversion`][3] when a SNIA style
///    `RegisteredOrganization` holds a non integer value.
///  * [`PingError::ProfileNotFound`][4] when no namespace holds the
///    profile. Wrong credentials on some servers look the same.
///
/// [1]: constant.CANDIDATE_NAMESPACES.html
/// [2]: enum.PingError.html#variant.AuthenticationFailed
/// [3]: enum.PingError.html#variant.TypeConversion
/// [4]: enum.PingError.html#variant.ProfileNotFound
pub fn discover_array_profile<C: CimClient + ?Sized>(
    client: &mut C,
) -> Result<(NamedInstance, String)> {
    let opts = EnumerateOptions::default();
    for ns in CANDIDATE_NAMESPACES.iter() {
        tracing::debug!(namespace = ns, "Enumerating registered profiles");
        let instances = match client.enumerate_instances(
            ns,
            REGISTERED_PROFILE_CLASS,
            &opts,
        ) {
            Ok(i) => i,
            Err(CimError::AccessDenied(_)) => {
                return Err(PingError::AuthenticationFailed(
                    "Incorrect credentials!".to_string(),
                ))
            }
            Err(CimError::InvalidNamespace(_)) => {
                tracing::debug!(namespace = ns, "Namespace not supported");
                continue;
            }
            Err(CimError::Other(e)) => {
                tracing::warn!(
                    namespace = ns,
                    "Enumerate instances ns=({}) result({})",
                    ns,
                    e
                );
                continue;
            }
        };

        for inst in instances {
            if is_array_profile(&inst)? {
                tracing::info!(
                    namespace = ns,
                    profile = %inst.name(),
                    "Found SNIA Array profile"
                );
                return Ok((inst, ns.to_string()));
            }
        }
    }

    Err(PingError::ProfileNotFound(
        "Provider does not appear to support interop or \
         username/password incorrect"
            .to_string(),
    ))
}

/// Whether `inst` registers the SNIA `Array` profile.
///
/// Only a `uint16` typed `RegisteredOrganization` is considered. A value
/// that does not convert to an integer fails the whole probe, while a
/// missing `RegisteredName` just disqualifies the instance.
pub fn is_array_profile(inst: &NamedInstance) -> Result<bool> {
    let props = inst.instance();
    let org = match props.property_by_name(PROP_REGISTERED_ORGANIZATION) {
        Some(p) => p,
        None => return Ok(false),
    };
    if *org.cim_type() != CimType::Uint16 {
        return Ok(false);
    }
    let org = match org.value_str() {
        Some(v) => v.parse::<i64>()?,
        None => return Ok(false),
    };
    if org != SNIA_ORGANIZATION {
        return Ok(false);
    }
    Ok(match props.property_by_name(PROP_REGISTERED_NAME) {
        Some(name) => name.value_str() == Some(ARRAY_PROFILE_NAME),
        None => false,
    })
}

/// Count the computer systems conforming to `profile`.
///
/// Zero is a valid answer. Any client error, access denied included, is
/// reported as [`PingError::AssociationQuery`][1].
///
/// [1]: enum.PingError.html#variant.AssociationQuery
pub fn resolve_associated_systems<C: CimClient + ?Sized>(
    client: &mut C,
    namespace: &str,
    profile: &NamedInstance,
) -> Result<usize> {
    let opts = AssociatorOptions {
        assoc_class: Some(CONFORMS_TO_PROFILE_CLASS.to_string()),
        result_class: Some(COMPUTER_SYSTEM_CLASS.to_string()),
        ..Default::default()
    };
    match client.associator_instances(namespace, profile.name(), &opts) {
        Ok(systems) => {
            tracing::debug!(
                namespace,
                count = systems.len(),
                "Associated systems"
            );
            Ok(systems.len())
        }
        Err(e) => Err(PingError::AssociationQuery(format!(
            "Failed to query systems associated to {}: {}",
            profile.name(),
            e
        ))),
    }
}

/// Locate the `Array` profile and count its computer systems.
pub fn ping<C: CimClient + ?Sized>(client: &mut C) -> Result<usize> {
    let (profile, namespace) = discover_array_profile(client)?;
    resolve_associated_systems(client, &namespace, &profile)
}
