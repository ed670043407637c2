use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use http::Method;
use s3probe_aws_v4::RequestSigner;
use s3probe_core::time::now;
use s3probe_core::{resolve, AddressingStyle, Credential, SignRequest, SigningRequest};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("aws_v4");

    let cred = Credential::new("access_key_id", "secret_access_key");
    let signer = RequestSigner::new("test");
    let target = resolve(
        "http://127.0.0.1:9000",
        "hello",
        "test",
        AddressingStyle::PathStyle,
        false,
    )
    .expect("target must be valid");

    group.bench_function("s3probe", |b| {
        b.iter(|| {
            let mut req =
                SigningRequest::from_target(Method::HEAD, &target).expect("must success");
            signer
                .sign_request(&mut req, &cred, now())
                .expect("must success")
        })
    });

    group.finish();
}
