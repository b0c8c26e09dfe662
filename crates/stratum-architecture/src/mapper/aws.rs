//! AWS type resolver.
//!
//! Understands Terraform resource names and common shorthands on top of the
//! static AWS table, plus the global services the table does not list.

use stratum_common::types::CloudProvider;

use super::{ResourceTypeMapper, static_table};
use crate::domain::{ResourceCategory, ResourceType};

/// Resolves AWS diagram types, including aliases.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsTypeMapper;

impl AwsTypeMapper {
    fn canonical(ir_type: &str) -> &str {
        match ir_type {
            "aws_vpc" => "vpc",
            "aws_subnet" => "subnet",
            "aws_instance" | "instance" | "ec2_instance" => "ec2",
            "aws_lambda_function" | "function" => "lambda",
            "aws_db_instance" | "database" | "rds_instance" => "rds",
            "aws_s3_bucket" | "bucket" => "s3",
            "aws_security_group" | "sg" => "security_group",
            "aws_internet_gateway" | "igw" => "internet_gateway",
            "aws_nat_gateway" | "nat" => "nat_gateway",
            "aws_lb" | "alb" | "nlb" | "elb" => "load_balancer",
            other => other,
        }
    }
}

impl ResourceTypeMapper for AwsTypeMapper {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    fn resolve(&self, ir_type: &str) -> Option<ResourceType> {
        let normalized = ir_type.trim().to_ascii_lowercase();
        match Self::canonical(&normalized) {
            "iam_role" | "aws_iam_role" => Some(ResourceType::global(
                "iam_role",
                "IAM Role",
                ResourceCategory::Security,
                "aws_iam_role",
            )),
            "cloudfront" | "aws_cloudfront_distribution" => Some(ResourceType::global(
                "cloudfront",
                "CloudFront Distribution",
                ResourceCategory::Edge,
                "aws_cloudfront_distribution",
            )),
            canonical => static_table::lookup(CloudProvider::Aws, canonical),
        }
    }
}
