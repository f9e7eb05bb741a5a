//! End-to-end scenario: two identities exchange a sealed message and a
//! signed message, with identifiers as the only public key material.

use veil_core::{
    device, envelope, signing, CryptoConfig, Identifier, KeyUse, PrimitiveProvider,
    SoftwareProvider,
};

#[tokio::test]
async fn full_messaging_scenario() {
    let provider = SoftwareProvider::new();
    let config = CryptoConfig::default();

    // Generate an Exchange keypair A and a Sign keypair B
    let a = provider
        .generate_keypair(config.exchange_spec().unwrap())
        .await
        .unwrap();
    let b = provider
        .generate_keypair(config.sign_spec().unwrap())
        .await
        .unwrap();

    // Encode both public keys into identifiers
    let id_a = Identifier::from_public_key(&a.public);
    let id_b = Identifier::from_public_key(&b.public);
    assert!(id_a.as_str().starts_with("ex2"));
    assert!(id_b.as_str().starts_with("sg2"));

    // An identifier alone reconstructs the exact key it was derived from
    let resolved_a = id_a.resolve_public_key(KeyUse::Exchange).unwrap();
    assert_eq!(resolved_a, a.public);

    // Seal "hello" to A's public key and open it with A's keypair
    let sealed = envelope::seal_to(&provider, &config, "hello".as_bytes(), &resolved_a, None)
        .await
        .unwrap();
    let content = envelope::open_from(&provider, &sealed, &a).await.unwrap();
    assert_eq!(content, b"hello");

    // The text form survives a round trip through transport
    let over_the_wire = sealed.to_base64();
    let received = veil_core::Envelope::from_base64(&over_the_wire).unwrap();
    let content = envelope::open_from(&provider, &received, &a).await.unwrap();
    assert_eq!(content, b"hello");

    // Sign "hello" with B's private key; verify against B's identifier
    let sig = signing::sign(&provider, b"hello", &b.private).await.unwrap();
    assert!(signing::verify(&provider, b"hello", &sig, id_b.as_str()).await);
    assert!(!signing::verify(&provider, b"goodbye", &sig, id_b.as_str()).await);

    // Verifying against the wrong-usage identifier is false, never an error
    assert!(!signing::verify(&provider, b"hello", &sig, id_a.as_str()).await);

    // Both identities get stable display labels
    let label_a = device::derive_device_name(&provider, id_a.as_str())
        .await
        .unwrap();
    let label_b = device::derive_device_name(&provider, id_b.as_str())
        .await
        .unwrap();
    assert_eq!(label_a.len(), 32);
    assert_ne!(label_a, label_b);
}
