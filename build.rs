use tonic_build::manual::{Builder, Method, Service};

/// Unary method using the prost codec over hand-written messages in `crate::proto`.
fn unary(name: &str, route_name: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route_name)
        .input_type(format!("crate::proto::{}", input))
        .output_type(format!("crate::proto::{}", output))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Module lifecycle calls issued by the host runtime.
    let module_service = Service::builder()
        .name("ModuleService")
        .package("viam.module.v1")
        .method(unary("ready", "Ready", "ReadyRequest", "ReadyResponse"))
        .method(unary(
            "add_resource",
            "AddResource",
            "AddResourceRequest",
            "AddResourceResponse",
        ))
        .method(unary(
            "reconfigure_resource",
            "ReconfigureResource",
            "ReconfigureResourceRequest",
            "ReconfigureResourceResponse",
        ))
        .method(unary(
            "remove_resource",
            "RemoveResource",
            "RemoveResourceRequest",
            "RemoveResourceResponse",
        ))
        .method(unary(
            "validate_config",
            "ValidateConfig",
            "ValidateConfigRequest",
            "ValidateConfigResponse",
        ))
        .build();

    // Camera capability calls routed to a named resource.
    let camera_service = Service::builder()
        .name("CameraService")
        .package("viam.component.camera.v1")
        .method(unary(
            "get_image",
            "GetImage",
            "GetImageRequest",
            "GetImageResponse",
        ))
        .method(unary(
            "get_images",
            "GetImages",
            "GetImagesRequest",
            "GetImagesResponse",
        ))
        .method(unary(
            "get_point_cloud",
            "GetPointCloud",
            "GetPointCloudRequest",
            "GetPointCloudResponse",
        ))
        .method(unary(
            "get_properties",
            "GetProperties",
            "GetPropertiesRequest",
            "GetPropertiesResponse",
        ))
        .build();

    Builder::new().compile(&[module_service, camera_service]);
}
