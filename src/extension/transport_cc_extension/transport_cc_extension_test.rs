use bytes::Bytes;

use super::*;

#[test]
fn test_transport_cc_extension_too_small() {
    let element = ExtensionElement::new(1, Bytes::from_static(&[0x02]));
    let result = TransportCcExtension::from_raw(&element);
    assert_eq!(result, Err(Error::ErrTransportCcExtensionSize(1)));
}

#[test]
fn test_transport_cc_extension() -> Result<()> {
    let raw = ExtensionElement::new(5, Bytes::from_static(&[0x00, 0x02]));
    let t1 = TransportCcExtension::from_raw(&raw)?;
    let t2 = TransportCcExtension {
        transport_sequence: 2,
    };
    assert_eq!(t1, t2);
    assert_eq!(t2.to_raw(5), raw);

    Ok(())
}

#[test]
fn test_transport_cc_extension_big_endian() -> Result<()> {
    let t = TransportCcExtension {
        transport_sequence: 0xABCD,
    };
    let raw = t.to_raw(1);
    assert_eq!(raw.payload, Bytes::from_static(&[0xAB, 0xCD]));
    assert_eq!(TransportCcExtension::from_raw(&raw)?, t);

    Ok(())
}

#[test]
fn test_transport_cc_extension_extra_bytes() {
    let element = ExtensionElement::new(1, Bytes::from_static(&[0x00, 0x02, 0x00]));
    let result = TransportCcExtension::from_raw(&element);
    assert_eq!(result, Err(Error::ErrTransportCcExtensionSize(3)));
}
