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

use std::fmt;

/// CIM intrinsic data type, as carried in the `TYPE` attribute of a
/// CIM-XML property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimType {
    Boolean,
    String,
    Char16,
    Uint8,
    Sint8,
    Uint16,
    Sint16,
    Uint32,
    Sint32,
    Uint64,
    Sint64,
    Real32,
    Real64,
    DateTime,
    Reference,
    /// Type name not defined by DSP0201, kept verbatim.
    Unknown(String),
}

impl CimType {
    /// Parse a `TYPE` attribute. Unknown names become
    /// [`CimType::Unknown`].
    pub fn parse(s: &str) -> CimType {
        match s {
            "boolean" => CimType::Boolean,
            "string" => CimType::String,
            "char16" => CimType::Char16,
            "uint8" => CimType::Uint8,
            "sint8" => CimType::Sint8,
            "uint16" => CimType::Uint16,
            "sint16" => CimType::Sint16,
            "uint32" => CimType::Uint32,
            "sint32" => CimType::Sint32,
            "uint64" => CimType::Uint64,
            "sint64" => CimType::Sint64,
            "real32" => CimType::Real32,
            "real64" => CimType::Real64,
            "datetime" => CimType::DateTime,
            "reference" => CimType::Reference,
            _ => CimType::Unknown(s.to_string()),
        }
    }
}

/// Value of a CIM property. Scalars and array members are kept in their
/// textual CIM-XML form; conversion is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CimValue {
    Scalar(String),
    Array(Vec<String>),
    Reference(ObjectName),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CimProperty {
    /// Property name, e.g. `RegisteredName`.
    pub name: String,
    /// Declared type of the property.
    pub cim_type: CimType,
    /// `None` when the property is NULL on the instance.
    pub value: Option<CimValue>,
}

impl CimProperty {
    pub fn value(&self) -> Option<&CimValue> {
        self.value.as_ref()
    }

    pub fn cim_type(&self) -> &CimType {
        &self.cim_type
    }

    /// The textual value when the property holds a non-NULL scalar.
    pub fn value_str(&self) -> Option<&str> {
        match self.value {
            Some(CimValue::Scalar(ref s)) => Some(s),
            _ => None,
        }
    }
}

/// Value of a single key binding in an instance path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValue {
    Value {
        /// `VALUETYPE` attribute: `string`, `boolean` or `numeric`.
        value_type: String,
        value: String,
    },
    Reference(Box<ObjectName>),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            KeyValue::Value {
                ref value_type,
                ref value,
            } => {
                if value_type == "string" {
                    write!(f, "\"{}\"", value)
                } else {
                    write!(f, "{}", value)
                }
            }
            KeyValue::Reference(ref o) => write!(f, "\"{}\"", o),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub name: String,
    pub value: KeyValue,
}

/// Identity of a remote instance: its class plus key bindings, and the
/// namespace when the server reported one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    pub class_name: String,
    pub namespace: Option<String>,
    pub key_bindings: Vec<KeyBinding>,
    /// Bare key of a single key class, sent without a `KEYBINDING`
    /// wrapper. Never set together with `key_bindings`.
    pub key_value: Option<KeyValue>,
}

impl ObjectName {
    pub fn new(class_name: &str) -> ObjectName {
        ObjectName {
            class_name: class_name.to_string(),
            namespace: None,
            key_bindings: Vec::new(),
            key_value: None,
        }
    }

    /// Append a string key binding, builder style.
    pub fn with_key(mut self, name: &str, value: &str) -> ObjectName {
        self.key_bindings.push(KeyBinding {
            name: name.to_string(),
            value: KeyValue::Value {
                value_type: "string".to_string(),
                value: value.to_string(),
            },
        });
        self
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(ref ns) = self.namespace {
            write!(f, "{}:", ns)?;
        }
        write!(f, "{}", self.class_name)?;
        for (i, kb) in self.key_bindings.iter().enumerate() {
            let sep = if i == 0 { '.' } else { ',' };
            write!(f, "{}{}={}", sep, kb.name, kb.value)?;
        }
        if let Some(ref kv) = self.key_value {
            write!(f, "={}", kv)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CimInstance {
    pub class_name: String,
    pub properties: Vec<CimProperty>,
}

impl CimInstance {
    pub fn new(class_name: &str) -> CimInstance {
        CimInstance {
            class_name: class_name.to_string(),
            properties: Vec::new(),
        }
    }

    /// Append a scalar property, builder style.
    pub fn with_property(
        mut self,
        name: &str,
        cim_type: CimType,
        value: Option<&str>,
    ) -> CimInstance {
        self.properties.push(CimProperty {
            name: name.to_string(),
            cim_type,
            value: value.map(|v| CimValue::Scalar(v.to_string())),
        });
        self
    }

    /// Look up a property by exact name.
    pub fn property_by_name(&self, name: &str) -> Option<&CimProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// An instance together with its object name, as returned by
/// `EnumerateInstances` and `Associators`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedInstance {
    pub name: ObjectName,
    pub instance: CimInstance,
}

impl NamedInstance {
    pub fn name(&self) -> &ObjectName {
        &self.name
    }

    pub fn instance(&self) -> &CimInstance {
        &self.instance
    }
}

/// Flags of an `EnumerateInstances` request. `Default` is the plainest
/// request: no flags set and all properties returned.
#[derive(Debug, Clone, Default)]
pub struct EnumerateOptions {
    pub deep_inheritance: bool,
    pub local_only: bool,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    /// `None` returns every property.
    pub property_list: Option<Vec<String>>,
}

/// Filters and flags of an `Associators` request. `Default` leaves every
/// filter unset.
#[derive(Debug, Clone, Default)]
pub struct AssociatorOptions {
    pub assoc_class: Option<String>,
    pub result_class: Option<String>,
    pub role: Option<String>,
    pub result_role: Option<String>,
    pub include_qualifiers: bool,
    pub include_class_origin: bool,
    pub property_list: Option<Vec<String>>,
}
