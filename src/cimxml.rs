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

//! Minimal CIM-XML (DSP0200/DSP0201) codec covering the intrinsic
//! `EnumerateInstances` and `Associators` operations.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::data::*;
use super::error::*;

const CIM_VERSION: &str = "2.0";
const DTD_VERSION: &str = "2.0";
const PROTOCOL_VERSION: &str = "1.0";

/// Build an `EnumerateInstances` request document.
pub fn encode_enumerate_instances(
    id: u32,
    namespace: &str,
    class_name: &str,
    opts: &EnumerateOptions,
) -> String {
    let mut params = String::new();
    push_class_param(&mut params, "ClassName", class_name);
    push_bool_param(&mut params, "DeepInheritance", opts.deep_inheritance);
    push_bool_param(&mut params, "LocalOnly", opts.local_only);
    push_bool_param(
        &mut params,
        "IncludeQualifiers",
        opts.include_qualifiers,
    );
    push_bool_param(
        &mut params,
        "IncludeClassOrigin",
        opts.include_class_origin,
    );
    if let Some(ref props) = opts.property_list {
        push_property_list(&mut params, props);
    }
    wrap_imethodcall(id, "EnumerateInstances", namespace, &params)
}

/// Build an `Associators` request document for an instance.
pub fn encode_associators(
    id: u32,
    namespace: &str,
    object_name: &ObjectName,
    opts: &AssociatorOptions,
) -> String {
    let mut params = String::new();
    params.push_str("<IPARAMVALUE NAME=\"ObjectName\">");
    push_instance_name(&mut params, object_name);
    params.push_str("</IPARAMVALUE>");
    if let Some(ref c) = opts.assoc_class {
        push_class_param(&mut params, "AssocClass", c);
    }
    if let Some(ref c) = opts.result_class {
        push_class_param(&mut params, "ResultClass", c);
    }
    if let Some(ref r) = opts.role {
        push_string_param(&mut params, "Role", r);
    }
    if let Some(ref r) = opts.result_role {
        push_string_param(&mut params, "ResultRole", r);
    }
    push_bool_param(
        &mut params,
        "IncludeQualifiers",
        opts.include_qualifiers,
    );
    push_bool_param(
        &mut params,
        "IncludeClassOrigin",
        opts.include_class_origin,
    );
    if let Some(ref props) = opts.property_list {
        push_property_list(&mut params, props);
    }
    wrap_imethodcall(id, "Associators", namespace, &params)
}

fn wrap_imethodcall(
    id: u32,
    method: &str,
    namespace: &str,
    params: &str,
) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\" ?>");
    out.push_str(&format!(
        "<CIM CIMVERSION=\"{}\" DTDVERSION=\"{}\">",
        CIM_VERSION, DTD_VERSION
    ));
    out.push_str(&format!(
        "<MESSAGE ID=\"{}\" PROTOCOLVERSION=\"{}\">",
        id, PROTOCOL_VERSION
    ));
    out.push_str("<SIMPLEREQ>");
    out.push_str(&format!("<IMETHODCALL NAME=\"{}\">", method));
    push_local_namespace_path(&mut out, namespace);
    out.push_str(params);
    out.push_str("</IMETHODCALL></SIMPLEREQ></MESSAGE></CIM>");
    out
}

fn push_local_namespace_path(out: &mut String, namespace: &str) {
    out.push_str("<LOCALNAMESPACEPATH>");
    for seg in namespace.split('/').filter(|s| !s.is_empty()) {
        out.push_str(&format!("<NAMESPACE NAME=\"{}\"/>", escape(seg)));
    }
    out.push_str("</LOCALNAMESPACEPATH>");
}

fn push_class_param(out: &mut String, name: &str, class_name: &str) {
    out.push_str(&format!(
        "<IPARAMVALUE NAME=\"{}\"><CLASSNAME NAME=\"{}\"/></IPARAMVALUE>",
        name,
        escape(class_name)
    ));
}

fn push_bool_param(out: &mut String, name: &str, val: bool) {
    out.push_str(&format!(
        "<IPARAMVALUE NAME=\"{}\"><VALUE>{}</VALUE></IPARAMVALUE>",
        name,
        if val { "TRUE" } else { "FALSE" }
    ));
}

fn push_string_param(out: &mut String, name: &str, val: &str) {
    out.push_str(&format!(
        "<IPARAMVALUE NAME=\"{}\"><VALUE>{}</VALUE></IPARAMVALUE>",
        name,
        escape(val)
    ));
}

fn push_property_list(out: &mut String, props: &[String]) {
    out.push_str("<IPARAMVALUE NAME=\"PropertyList\"><VALUE.ARRAY>");
    for p in props {
        out.push_str(&format!("<VALUE>{}</VALUE>", escape(p.as_str())));
    }
    out.push_str("</VALUE.ARRAY></IPARAMVALUE>");
}

fn push_instance_name(out: &mut String, name: &ObjectName) {
    out.push_str(&format!(
        "<INSTANCENAME CLASSNAME=\"{}\">",
        escape(name.class_name.as_str())
    ));
    for kb in &name.key_bindings {
        out.push_str(&format!(
            "<KEYBINDING NAME=\"{}\">",
            escape(kb.name.as_str())
        ));
        push_key_value(out, &kb.value);
        out.push_str("</KEYBINDING>");
    }
    if let Some(ref kv) = name.key_value {
        push_key_value(out, kv);
    }
    out.push_str("</INSTANCENAME>");
}

fn push_key_value(out: &mut String, kv: &KeyValue) {
    match *kv {
        KeyValue::Value {
            ref value_type,
            ref value,
        } => out.push_str(&format!(
            "<KEYVALUE VALUETYPE=\"{}\">{}</KEYVALUE>",
            escape(value_type.as_str()),
            escape(value.as_str())
        )),
        KeyValue::Reference(ref o) => {
            out.push_str("<VALUE.REFERENCE>");
            push_instance_name(out, o);
            out.push_str("</VALUE.REFERENCE>");
        }
    }
}

/// Owned element of a parsed CIM-XML document.
#[derive(Debug)]
struct Node {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    text: String,
}

impl Node {
    fn from_start(e: &BytesStart) -> CimResult<Node> {
        let mut attrs = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            attrs.push((
                String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                attr.unescape_value()?.into_owned(),
            ));
        }
        Ok(Node {
            name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
            attrs,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    fn required_attr(&self, name: &str) -> CimResult<&str> {
        self.attr(name).ok_or_else(|| {
            CimError::Other(format!(
                "CIM-XML element {} missing attribute {}",
                self.name, name
            ))
        })
    }

    fn required_child(&self, name: &str) -> CimResult<&Node> {
        self.child(name).ok_or_else(|| {
            CimError::Other(format!(
                "CIM-XML element {} missing child {}",
                self.name, name
            ))
        })
    }
}

fn parse_tree(xml: &str) -> CimResult<Node> {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Node {
        name: String::new(),
        attrs: Vec::new(),
        children: Vec::new(),
        text: String::new(),
    }];
    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(Node::from_start(e)?),
            Event::Empty(ref e) => {
                let node = Node::from_start(e)?;
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::End(_) => {
                let node = match stack.pop() {
                    Some(n) => n,
                    None => break,
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => {
                        return Err(CimError::Other(
                            "Unbalanced CIM-XML reply".to_string(),
                        ))
                    }
                }
            }
            Event::Text(ref t) => {
                let text = t.unescape()?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(node) = stack.last_mut() {
                    node.text
                        .push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }
    match stack.pop() {
        Some(root) if stack.is_empty() => Ok(root),
        _ => Err(CimError::Other("Truncated CIM-XML reply".to_string())),
    }
}

/// Decode the reply of an intrinsic method call into its returned
/// instances.
///
/// # Errors
///
///  * The `CimError` built from an `<ERROR>` element when the server
///    reported a failure.
///  * `CimError::Other` when the document is not a well formed CIM-XML
///    method response.
pub fn decode_response(xml: &str) -> CimResult<Vec<NamedInstance>> {
    let root = parse_tree(xml)?;
    let rsp = root
        .required_child("CIM")?
        .required_child("MESSAGE")?
        .required_child("SIMPLERSP")?
        .required_child("IMETHODRESPONSE")?;

    if let Some(err) = rsp.child("ERROR") {
        let code = err.required_attr("CODE")?;
        let code = code.trim().parse::<u32>().map_err(|_| {
            CimError::Other(format!("Invalid CIM error code '{}'", code))
        })?;
        return Err(CimError::from_code(
            code,
            err.attr("DESCRIPTION").unwrap_or(""),
        ));
    }

    let ret = match rsp.child("IRETURNVALUE") {
        Some(r) => r,
        None => return Ok(Vec::new()),
    };
    let mut instances = Vec::new();
    for node in &ret.children {
        match node.name.as_str() {
            "VALUE.NAMEDINSTANCE" => {
                instances.push(NamedInstance {
                    name: decode_instance_name(
                        node.required_child("INSTANCENAME")?,
                        None,
                    )?,
                    instance: decode_instance(
                        node.required_child("INSTANCE")?,
                    )?,
                });
            }
            "VALUE.OBJECTWITHPATH" | "VALUE.INSTANCEWITHPATH" => {
                let path = match node.child("INSTANCEPATH") {
                    Some(p) => p,
                    // Class results carry CLASSPATH, not of interest here.
                    None => continue,
                };
                instances.push(NamedInstance {
                    name: decode_instance_path(path)?,
                    instance: decode_instance(
                        node.required_child("INSTANCE")?,
                    )?,
                });
            }
            _ => (),
        }
    }
    Ok(instances)
}

fn decode_local_namespace(node: &Node) -> String {
    node.children
        .iter()
        .filter(|c| c.name == "NAMESPACE")
        .filter_map(|c| c.attr("NAME"))
        .collect::<Vec<&str>>()
        .join("/")
}

fn decode_instance_path(node: &Node) -> CimResult<ObjectName> {
    let namespace = node
        .child("NAMESPACEPATH")
        .and_then(|p| p.child("LOCALNAMESPACEPATH"))
        .or_else(|| node.child("LOCALNAMESPACEPATH"))
        .map(decode_local_namespace);
    decode_instance_name(node.required_child("INSTANCENAME")?, namespace)
}

fn decode_instance_name(
    node: &Node,
    namespace: Option<String>,
) -> CimResult<ObjectName> {
    let mut name = ObjectName::new(node.required_attr("CLASSNAME")?);
    name.namespace = namespace;
    for kb in node.children.iter().filter(|c| c.name == "KEYBINDING") {
        let value = match decode_key_value(kb)? {
            Some(v) => v,
            None => {
                return Err(CimError::Other(format!(
                    "Empty CIM-XML key binding in {}",
                    name.class_name
                )))
            }
        };
        name.key_bindings.push(KeyBinding {
            name: kb.required_attr("NAME")?.to_string(),
            value,
        });
    }
    if name.key_bindings.is_empty() {
        // Single key classes may carry the bare key.
        name.key_value = decode_key_value(node)?;
    }
    Ok(name)
}

fn decode_key_value(node: &Node) -> CimResult<Option<KeyValue>> {
    if let Some(kv) = node.child("KEYVALUE") {
        Ok(Some(KeyValue::Value {
            value_type: kv.attr("VALUETYPE").unwrap_or("string").to_string(),
            value: kv.text.clone(),
        }))
    } else if let Some(r) = node.child("VALUE.REFERENCE") {
        Ok(Some(KeyValue::Reference(Box::new(decode_reference(r)?))))
    } else {
        Ok(None)
    }
}

fn decode_reference(node: &Node) -> CimResult<ObjectName> {
    if let Some(p) = node.child("INSTANCEPATH") {
        decode_instance_path(p)
    } else if let Some(p) = node.child("LOCALINSTANCEPATH") {
        decode_instance_path(p)
    } else {
        decode_instance_name(node.required_child("INSTANCENAME")?, None)
    }
}

fn decode_instance(node: &Node) -> CimResult<CimInstance> {
    let mut inst = CimInstance::new(node.required_attr("CLASSNAME")?);
    for p in &node.children {
        let value = match p.name.as_str() {
            "PROPERTY" => p.child("VALUE").map(|v| CimValue::Scalar(v.text.clone())),
            "PROPERTY.ARRAY" => p.child("VALUE.ARRAY").map(|a| {
                CimValue::Array(
                    a.children
                        .iter()
                        .filter(|v| v.name == "VALUE")
                        .map(|v| v.text.clone())
                        .collect(),
                )
            }),
            "PROPERTY.REFERENCE" => match p.child("VALUE.REFERENCE") {
                Some(r) => Some(CimValue::Reference(decode_reference(r)?)),
                None => None,
            },
            _ => continue,
        };
        let cim_type = if p.name == "PROPERTY.REFERENCE" {
            CimType::Reference
        } else {
            CimType::parse(p.attr("TYPE").unwrap_or("string"))
        };
        inst.properties.push(CimProperty {
            name: p.required_attr("NAME")?.to_string(),
            cim_type,
            value,
        });
    }
    Ok(inst)
}
