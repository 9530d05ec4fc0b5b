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

extern crate smisping;

use smisping::cimxml;
use smisping::{
    AssociatorOptions, CimError, CimType, CimValue, EnumerateOptions, KeyValue,
    ObjectName,
};

static ENUM_REPLY: &'static str = r#"<?xml version="1.0" encoding="utf-8" ?>
<CIM CIMVERSION="2.0" DTDVERSION="2.0">
  <MESSAGE ID="1001" PROTOCOLVERSION="1.0">
    <SIMPLERSP>
      <IMETHODRESPONSE NAME="EnumerateInstances">
        <IRETURNVALUE>
          <VALUE.NAMEDINSTANCE>
            <INSTANCENAME CLASSNAME="OMC_RegisteredArrayProfile">
              <KEYBINDING NAME="InstanceID">
                <KEYVALUE VALUETYPE="string">SNIA:Array:1.4</KEYVALUE>
              </KEYBINDING>
            </INSTANCENAME>
            <INSTANCE CLASSNAME="OMC_RegisteredArrayProfile">
              <PROPERTY NAME="InstanceID" TYPE="string">
                <VALUE>SNIA:Array:1.4</VALUE>
              </PROPERTY>
              <PROPERTY NAME="RegisteredOrganization" TYPE="uint16">
                <VALUE>11</VALUE>
              </PROPERTY>
              <PROPERTY NAME="RegisteredName" TYPE="string">
                <VALUE>Array</VALUE>
              </PROPERTY>
              <PROPERTY NAME="OtherRegisteredOrganization" TYPE="string"/>
              <PROPERTY.ARRAY NAME="AdvertiseTypes" TYPE="uint16">
                <VALUE.ARRAY><VALUE>3</VALUE><VALUE>2</VALUE></VALUE.ARRAY>
              </PROPERTY.ARRAY>
            </INSTANCE>
          </VALUE.NAMEDINSTANCE>
          <VALUE.NAMEDINSTANCE>
            <INSTANCENAME CLASSNAME="OMC_RegisteredProfile">
              <KEYBINDING NAME="InstanceID">
                <KEYVALUE VALUETYPE="string">SNIA:Server &amp; more</KEYVALUE>
              </KEYBINDING>
            </INSTANCENAME>
            <INSTANCE CLASSNAME="OMC_RegisteredProfile">
              <PROPERTY NAME="RegisteredOrganization" TYPE="uint16">
                <VALUE>11</VALUE>
              </PROPERTY>
              <PROPERTY NAME="RegisteredName" TYPE="string">
                <VALUE>Server</VALUE>
              </PROPERTY>
            </INSTANCE>
          </VALUE.NAMEDINSTANCE>
        </IRETURNVALUE>
      </IMETHODRESPONSE>
    </SIMPLERSP>
  </MESSAGE>
</CIM>
"#;

static ASSOC_REPLY: &'static str = r#"<?xml version="1.0" encoding="utf-8" ?>
<CIM CIMVERSION="2.0" DTDVERSION="2.0">
<MESSAGE ID="1002" PROTOCOLVERSION="1.0">
<SIMPLERSP>
<IMETHODRESPONSE NAME="Associators">
<IRETURNVALUE>
<VALUE.OBJECTWITHPATH>
<INSTANCEPATH>
<NAMESPACEPATH>
<HOST>10.0.0.5</HOST>
<LOCALNAMESPACEPATH><NAMESPACE NAME="root"/><NAMESPACE NAME="array"/></LOCALNAMESPACEPATH>
</NAMESPACEPATH>
<INSTANCENAME CLASSNAME="ARR_StorageSystem">
<KEYBINDING NAME="CreationClassName"><KEYVALUE VALUETYPE="string">ARR_StorageSystem</KEYVALUE></KEYBINDING>
<KEYBINDING NAME="Name"><KEYVALUE VALUETYPE="string">array-01</KEYVALUE></KEYBINDING>
</INSTANCENAME>
</INSTANCEPATH>
<INSTANCE CLASSNAME="ARR_StorageSystem">
<PROPERTY NAME="ElementName" TYPE="string"><VALUE>array-01</VALUE></PROPERTY>
</INSTANCE>
</VALUE.OBJECTWITHPATH>
</IRETURNVALUE>
</IMETHODRESPONSE>
</SIMPLERSP>
</MESSAGE>
</CIM>
"#;

fn error_reply(code: u32, desc: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\
         <CIM CIMVERSION=\"2.0\" DTDVERSION=\"2.0\">\
         <MESSAGE ID=\"1001\" PROTOCOLVERSION=\"1.0\"><SIMPLERSP>\
         <IMETHODRESPONSE NAME=\"EnumerateInstances\">\
         <ERROR CODE=\"{}\" DESCRIPTION=\"{}\"/>\
         </IMETHODRESPONSE></SIMPLERSP></MESSAGE></CIM>",
        code, desc
    )
}

#[test]
fn decode_enumerate_instances() {
    let insts = cimxml::decode_response(ENUM_REPLY).unwrap();
    assert_eq!(insts.len(), 2);

    let arr = &insts[0];
    assert_eq!(arr.name().class_name, "OMC_RegisteredArrayProfile");
    assert_eq!(arr.name().key_bindings[0].name, "InstanceID");
    let org = arr
        .instance()
        .property_by_name("RegisteredOrganization")
        .unwrap();
    assert_eq!(*org.cim_type(), CimType::Uint16);
    assert_eq!(org.value_str(), Some("11"));
    let other = arr
        .instance()
        .property_by_name("OtherRegisteredOrganization")
        .unwrap();
    assert!(other.value().is_none());
    let adv = arr.instance().property_by_name("AdvertiseTypes").unwrap();
    assert_eq!(
        adv.value(),
        Some(&CimValue::Array(vec!["3".to_string(), "2".to_string()]))
    );
    assert!(smisping::is_array_profile(arr).unwrap());

    match insts[1].name().key_bindings[0].value {
        KeyValue::Value { ref value, .. } => {
            assert_eq!(value, "SNIA:Server & more")
        }
        ref v => panic!("unexpected key value {:?}", v),
    }
    assert!(!smisping::is_array_profile(&insts[1]).unwrap());
}

#[test]
fn decode_associators() {
    let insts = cimxml::decode_response(ASSOC_REPLY).unwrap();
    assert_eq!(insts.len(), 1);
    assert_eq!(insts[0].name().namespace.as_ref().unwrap(), "root/array");
    assert_eq!(insts[0].name().key_bindings.len(), 2);
    assert_eq!(
        format!("{}", insts[0].name()),
        "root/array:ARR_StorageSystem.CreationClassName=\
         \"ARR_StorageSystem\",Name=\"array-01\""
    );
}

#[test]
fn decode_empty_result() {
    let xml = "<CIM CIMVERSION=\"2.0\" DTDVERSION=\"2.0\">\
               <MESSAGE ID=\"7\" PROTOCOLVERSION=\"1.0\"><SIMPLERSP>\
               <IMETHODRESPONSE NAME=\"Associators\"><IRETURNVALUE/>\
               </IMETHODRESPONSE></SIMPLERSP></MESSAGE></CIM>";
    assert!(cimxml::decode_response(xml).unwrap().is_empty());

    let xml = "<CIM><MESSAGE><SIMPLERSP>\
               <IMETHODRESPONSE NAME=\"Associators\"/>\
               </SIMPLERSP></MESSAGE></CIM>";
    assert!(cimxml::decode_response(xml).unwrap().is_empty());
}

#[test]
fn decode_cim_errors() {
    match cimxml::decode_response(&error_reply(2, "CIM_ERR_ACCESS_DENIED")) {
        Err(CimError::AccessDenied(_)) => (),
        r => panic!("unexpected {:?}", r),
    }
    match cimxml::decode_response(&error_reply(3, "bad namespace")) {
        Err(CimError::InvalidNamespace(m)) => assert!(m.contains("bad namespace")),
        r => panic!("unexpected {:?}", r),
    }
    match cimxml::decode_response(&error_reply(6, "CIM_ERR_NOT_FOUND")) {
        Err(CimError::Other(_)) => (),
        r => panic!("unexpected {:?}", r),
    }
}

#[test]
fn decode_garbage() {
    for xml in &[
        "",
        "not xml at all",
        "<CIM><MESSAGE><SIMPLERSP></MESSAGE></CIM>",
        "<html><body>502 Bad Gateway</body></html>",
    ] {
        match cimxml::decode_response(xml) {
            Err(CimError::Other(_)) => (),
            r => panic!("unexpected {:?} for {:?}", r, xml),
        }
    }
}

#[test]
fn classify_error_text() {
    assert_eq!(
        CimError::from_message("code 2: CIM_ERR_ACCESS_DENIED"),
        CimError::AccessDenied("code 2: CIM_ERR_ACCESS_DENIED".to_string())
    );
    assert_eq!(
        CimError::from_message("CIM_ERR_INVALID_NAMESPACE root/foo"),
        CimError::InvalidNamespace(
            "CIM_ERR_INVALID_NAMESPACE root/foo".to_string()
        )
    );
    assert_eq!(
        CimError::from_message("connection refused"),
        CimError::Other("connection refused".to_string())
    );
    // Access denied wins when both markers show up.
    match CimError::from_message(
        "CIM_ERR_INVALID_NAMESPACE then CIM_ERR_ACCESS_DENIED",
    ) {
        CimError::AccessDenied(_) => (),
        e => panic!("unexpected {:?}", e),
    }
}

#[test]
fn encode_enumerate_instances_request() {
    let req = cimxml::encode_enumerate_instances(
        1001,
        "root/PG_Interop",
        "CIM_RegisteredProfile",
        &EnumerateOptions::default(),
    );
    assert!(req.contains("<MESSAGE ID=\"1001\" PROTOCOLVERSION=\"1.0\">"));
    assert!(req.contains("<IMETHODCALL NAME=\"EnumerateInstances\">"));
    assert!(req.contains(
        "<LOCALNAMESPACEPATH><NAMESPACE NAME=\"root\"/>\
         <NAMESPACE NAME=\"PG_Interop\"/></LOCALNAMESPACEPATH>"
    ));
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"ClassName\">\
         <CLASSNAME NAME=\"CIM_RegisteredProfile\"/></IPARAMVALUE>"
    ));
    for flag in &[
        "DeepInheritance",
        "LocalOnly",
        "IncludeQualifiers",
        "IncludeClassOrigin",
    ] {
        assert!(req.contains(&format!(
            "<IPARAMVALUE NAME=\"{}\"><VALUE>FALSE</VALUE></IPARAMVALUE>",
            flag
        )));
    }
    assert!(!req.contains("PropertyList"));

    let opts = EnumerateOptions {
        deep_inheritance: true,
        property_list: Some(vec!["RegisteredName".to_string()]),
        ..Default::default()
    };
    let req = cimxml::encode_enumerate_instances(2, "interop", "X", &opts);
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"DeepInheritance\"><VALUE>TRUE</VALUE>"
    ));
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"PropertyList\"><VALUE.ARRAY>\
         <VALUE>RegisteredName</VALUE></VALUE.ARRAY></IPARAMVALUE>"
    ));
}

#[test]
fn encode_associators_request() {
    let name = ObjectName::new("CIM_RegisteredProfile")
        .with_key("InstanceID", "SNIA:Array<1.4>");
    let opts = AssociatorOptions {
        assoc_class: Some("CIM_ElementConformsToProfile".to_string()),
        result_class: Some("CIM_ComputerSystem".to_string()),
        ..Default::default()
    };
    let req = cimxml::encode_associators(1002, "interop", &name, &opts);
    assert!(req.contains("<IMETHODCALL NAME=\"Associators\">"));
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"ObjectName\">\
         <INSTANCENAME CLASSNAME=\"CIM_RegisteredProfile\">\
         <KEYBINDING NAME=\"InstanceID\">\
         <KEYVALUE VALUETYPE=\"string\">SNIA:Array&lt;1.4&gt;</KEYVALUE>\
         </KEYBINDING></INSTANCENAME></IPARAMVALUE>"
    ));
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"AssocClass\">\
         <CLASSNAME NAME=\"CIM_ElementConformsToProfile\"/></IPARAMVALUE>"
    ));
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"ResultClass\">\
         <CLASSNAME NAME=\"CIM_ComputerSystem\"/></IPARAMVALUE>"
    ));
    assert!(!req.contains("\"Role\""));
    assert!(!req.contains("ResultRole"));

    let opts = AssociatorOptions {
        role: Some("ConformantStandard".to_string()),
        ..Default::default()
    };
    let req = cimxml::encode_associators(1003, "interop", &name, &opts);
    assert!(req.contains(
        "<IPARAMVALUE NAME=\"Role\"><VALUE>ConformantStandard</VALUE>"
    ));
    assert!(!req.contains("AssocClass"));
}

fn enum_reply(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\" ?>\
         <CIM CIMVERSION=\"2.0\" DTDVERSION=\"2.0\">\
         <MESSAGE ID=\"1001\" PROTOCOLVERSION=\"1.0\"><SIMPLERSP>\
         <IMETHODRESPONSE NAME=\"EnumerateInstances\"><IRETURNVALUE>\
         {}\
         </IRETURNVALUE></IMETHODRESPONSE></SIMPLERSP></MESSAGE></CIM>",
        body
    )
}

#[test]
fn decode_keeps_value_whitespace() {
    let xml = enum_reply(
        "<VALUE.NAMEDINSTANCE>\
         <INSTANCENAME CLASSNAME=\"X_Profile\">\
         <KEYBINDING NAME=\"InstanceID\">\
         <KEYVALUE VALUETYPE=\"string\"> id </KEYVALUE>\
         </KEYBINDING></INSTANCENAME>\
         <INSTANCE CLASSNAME=\"X_Profile\">\
         <PROPERTY NAME=\"RegisteredOrganization\" TYPE=\"uint16\">\
         <VALUE>11</VALUE></PROPERTY>\
         <PROPERTY NAME=\"RegisteredName\" TYPE=\"string\">\
         <VALUE>  Array \n</VALUE></PROPERTY>\
         </INSTANCE></VALUE.NAMEDINSTANCE>",
    );
    let insts = cimxml::decode_response(&xml).unwrap();
    assert_eq!(insts.len(), 1);
    let name = insts[0]
        .instance()
        .property_by_name("RegisteredName")
        .unwrap();
    assert_eq!(name.value_str(), Some("  Array \n"));
    assert_eq!(
        insts[0].name().key_bindings[0].value,
        KeyValue::Value {
            value_type: "string".to_string(),
            value: " id ".to_string(),
        }
    );
    assert!(!smisping::is_array_profile(&insts[0]).unwrap());
}

#[test]
fn single_key_name_round_trip() {
    let xml = enum_reply(
        "<VALUE.NAMEDINSTANCE>\
         <INSTANCENAME CLASSNAME=\"X_Profile\">\
         <KEYVALUE VALUETYPE=\"string\">only</KEYVALUE>\
         </INSTANCENAME>\
         <INSTANCE CLASSNAME=\"X_Profile\"/>\
         </VALUE.NAMEDINSTANCE>",
    );
    let insts = cimxml::decode_response(&xml).unwrap();
    assert_eq!(insts.len(), 1);
    let name = insts[0].name();
    assert!(name.key_bindings.is_empty());
    assert_eq!(
        name.key_value,
        Some(KeyValue::Value {
            value_type: "string".to_string(),
            value: "only".to_string(),
        })
    );
    assert_eq!(format!("{}", name), "X_Profile=\"only\"");

    let req = cimxml::encode_associators(
        1002,
        "interop",
        name,
        &AssociatorOptions::default(),
    );
    assert!(req.contains(
        "<INSTANCENAME CLASSNAME=\"X_Profile\">\
         <KEYVALUE VALUETYPE=\"string\">only</KEYVALUE>\
         </INSTANCENAME>"
    ));
    assert!(!req.contains("KEYBINDING"));
}
