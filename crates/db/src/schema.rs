use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email VARCHAR(254) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        role VARCHAR(20) NOT NULL DEFAULT 'patient'
            CHECK (role IN ('admin', 'doctor', 'nurse', 'staff', 'patient')),
        first_name VARCHAR(150) NOT NULL DEFAULT '',
        last_name VARCHAR(150) NOT NULL DEFAULT '',
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        date_joined TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
"#;

const CREATE_PATIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS patients (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        name VARCHAR(255) NOT NULL DEFAULT 'unknown',
        age INTEGER NULL CHECK (age >= 0),
        gender VARCHAR(10) NULL CHECK (gender IN ('Male', 'Female')),
        contact VARCHAR(20) NULL,
        medical_history TEXT NULL,
        blood_type VARCHAR(3) NULL
            CHECK (blood_type IN ('A+', 'A-', 'B+', 'B-', 'AB+', 'AB-', 'O+', 'O-')),
        allergies TEXT NOT NULL DEFAULT '',
        chronic_conditions TEXT NOT NULL DEFAULT '',
        last_physical DATE NULL,
        insurance_provider VARCHAR(100) NOT NULL DEFAULT '',
        insurance_id VARCHAR(50) NOT NULL DEFAULT ''
    );
"#;

const CREATE_APPOINTMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        patient_id UUID NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
        doctor_id UUID NULL REFERENCES users(id) ON DELETE SET NULL,
        date DATE NOT NULL,
        time TIME NOT NULL DEFAULT '12:00:00',
        notes TEXT NULL,
        status VARCHAR(20) NOT NULL DEFAULT 'scheduled'
            CHECK (status IN ('scheduled', 'completed', 'cancelled'))
    );
"#;

const CREATE_PRESCRIPTIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS prescriptions (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        patient_id UUID NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
        doctor_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        medication VARCHAR(255) NOT NULL,
        dosage VARCHAR(100) NOT NULL,
        instructions TEXT NOT NULL,
        date_prescribed TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    );
"#;

const CREATE_INVENTORY_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS inventory_items (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        medicine_name VARCHAR(100) NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity >= 0),
        expiry_date DATE NOT NULL,
        threshold INTEGER NOT NULL DEFAULT 10 CHECK (threshold >= 0)
    );
"#;

const CREATE_INDEXES: [&str; 6] = [
    "CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);",
    "CREATE INDEX IF NOT EXISTS idx_appointments_doctor_date ON appointments(doctor_id, date);",
    "CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);",
    "CREATE INDEX IF NOT EXISTS idx_prescriptions_patient_id ON prescriptions(patient_id);",
    "CREATE INDEX IF NOT EXISTS idx_prescriptions_doctor_id ON prescriptions(doctor_id);",
    "CREATE INDEX IF NOT EXISTS idx_inventory_items_expiry_date ON inventory_items(expiry_date);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Tables in dependency order: users before anything that references them
    for statement in [
        CREATE_USERS,
        CREATE_PATIENTS,
        CREATE_APPOINTMENTS,
        CREATE_PRESCRIPTIONS,
        CREATE_INVENTORY_ITEMS,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    // Prepared statements take one command each
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
