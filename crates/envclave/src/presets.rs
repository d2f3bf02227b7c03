//! Ready-made schemas for common feature configurations.
//!
//! These double as executable documentation for the rule engine: per-provider
//! credential requirements, environment-gated hardening, and truthiness-gated
//! companions are all expressed with the public builder API.

use crate::rules::{Condition, RequireRule};
use crate::schema::{Field, Format, Schema};

/// Storage feature schema: provider-gated credentials for local, S3, Azure,
/// and GCS backends.
pub fn storage_config() -> Schema {
    let s3 = || Condition::equals("provider", "s3");
    let azure = || Condition::equals("provider", "azure");
    let gcs = || Condition::equals("provider", "gcs");
    let production = || Condition::equals("environment", "production");

    Schema::builder("storage")
        .field(
            Field::enumeration("provider", ["local", "s3", "azure", "gcs"]).required(),
        )
        .field(Field::enumeration(
            "environment",
            ["development", "staging", "production"],
        ))
        .field(Field::string("baseDir").default_value("/uploads"))
        .field(Field::number("maxFileSize").default_value(10_485_760))
        .field(Field::string("awsAccessKeyId").rule(
            RequireRule::when(s3())
                .message("AWS Access Key ID is required when using S3 storage provider"),
        ))
        .field(Field::string("awsSecretAccessKey").rule(
            RequireRule::when(s3())
                .message("AWS Secret Access Key is required when using S3 storage provider"),
        ))
        .field(Field::string("s3BucketName").rule(
            RequireRule::when(s3())
                .message("S3 bucket name is required when using S3 storage provider"),
        ))
        .field(Field::string("s3Region").rule(
            RequireRule::when(s3()).message("S3 region is required when using S3 storage provider"),
        ))
        .field(Field::string("azureAccountName").rule(
            RequireRule::when(azure())
                .message("Azure Storage Account Name is required when using Azure storage provider"),
        ))
        .field(Field::string("azureAccountKey").rule(
            RequireRule::when(azure())
                .message("Azure Storage Account Key is required when using Azure storage provider"),
        ))
        .field(Field::string("azureContainerName").rule(
            RequireRule::when(azure())
                .message("Azure container name is required when using Azure storage provider"),
        ))
        .field(Field::string("gcsBucketName").rule(
            RequireRule::when(gcs())
                .message("GCS bucket name is required when using Google Cloud Storage provider"),
        ))
        .field(Field::string("gcsProjectId").rule(
            RequireRule::when(gcs())
                .message("GCS project ID is required when using Google Cloud Storage provider"),
        ))
        .field(Field::string("gcsKeyFilePath").rule(
            RequireRule::when_all([gcs(), production()]).message(
                "GCS key file path is required when using Google Cloud Storage in production",
            ),
        ))
        .field(Field::boolean("enableCompression").default_value(false))
        .field(Field::boolean("enableEncryption").default_value(false).rule(
            RequireRule::when_all([
                Condition::is_in("provider", ["s3", "azure", "gcs"]),
                production(),
            ])
            .message("File encryption must be enabled for cloud storage providers in production"),
        ))
        .field(Field::string("cdnUrl").format(Format::Url))
        .build()
}

/// Email feature schema: provider-gated transport credentials for SMTP,
/// SendGrid, Mailgun, and SES.
pub fn email_config() -> Schema {
    let smtp = || Condition::equals("provider", "smtp");
    let ses = || Condition::equals("provider", "ses");

    Schema::builder("email")
        .field(
            Field::enumeration("provider", ["smtp", "sendgrid", "mailgun", "ses"]).required(),
        )
        .field(Field::string("fromEmail").format(Format::Email).required())
        .field(Field::string("fromName").required())
        .field(Field::boolean("enabled").default_value(true))
        .field(Field::string("smtpHost").rule(
            RequireRule::when(smtp()).message("SMTP host is required when using SMTP provider"),
        ))
        .field(Field::number("smtpPort").rule(
            RequireRule::when(smtp()).message("SMTP port is required when using SMTP provider"),
        ))
        .field(Field::string("smtpUsername").rule(
            RequireRule::when(smtp()).message("SMTP username is required when using SMTP provider"),
        ))
        .field(Field::string("smtpPassword").rule(
            RequireRule::when(smtp()).message("SMTP password is required when using SMTP provider"),
        ))
        .field(Field::boolean("smtpSecure").default_value(true))
        .field(Field::string("sendgridApiKey").rule(
            RequireRule::when(Condition::equals("provider", "sendgrid"))
                .message("SendGrid API key is required when using SendGrid provider"),
        ))
        .field(Field::string("mailgunApiKey").rule(
            RequireRule::when(Condition::equals("provider", "mailgun"))
                .message("Mailgun API key is required when using Mailgun provider"),
        ))
        .field(Field::string("mailgunDomain").rule(
            RequireRule::when(Condition::equals("provider", "mailgun"))
                .message("Mailgun domain is required when using Mailgun provider"),
        ))
        .field(Field::string("sesRegion").rule(
            RequireRule::when(ses()).message("AWS SES region is required when using SES provider"),
        ))
        .field(Field::string("awsAccessKeyId").rule(
            RequireRule::when(ses())
                .message("AWS Access Key ID is required when using SES provider"),
        ))
        .field(Field::string("awsSecretAccessKey").rule(
            RequireRule::when(ses())
                .message("AWS Secret Access Key is required when using SES provider"),
        ))
        .field(Field::number("maxRetries").default_value(3))
        .field(Field::number("rateLimit").default_value(100))
        .field(Field::boolean("enableTemplates").default_value(true))
        .field(Field::string("templatePath").rule(
            RequireRule::when(Condition::truthy("enableTemplates"))
                .message("Template directory path is required when templates are enabled"),
        ))
        .build()
}
